//! State-change notification.
//!
//! The engine announces a committed ball by handing a [`ScoreEvent`] to a
//! [`Broadcaster`]; how it reaches clients (websocket, SSE, queue) is the
//! transport layer's problem. Delivery is fire-and-forget: a failed publish
//! is logged and never unwinds the committed transaction.

use std::sync::Mutex;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Innings;

/// Payload published after every committed ball. Consumers receive the full
/// innings and diff it themselves.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreEvent {
    pub match_id: Uuid,
    pub innings_id: Uuid,
    pub innings: Innings,
}

#[derive(Error, Debug)]
#[error("broadcast failed: {0}")]
pub struct BroadcastError(pub String);

pub trait Broadcaster: Send + Sync {
    fn publish(&self, event: &ScoreEvent) -> Result<(), BroadcastError>;
}

/// Drops every event. The default for deployments that poll.
#[derive(Debug, Default)]
pub struct NoopBroadcaster;

impl Broadcaster for NoopBroadcaster {
    fn publish(&self, _event: &ScoreEvent) -> Result<(), BroadcastError> {
        Ok(())
    }
}

/// Buffers published events in memory. Used by embedded consumers and the
/// test suite to observe delivery order.
#[derive(Debug, Default)]
pub struct RecordingBroadcaster {
    events: Mutex<Vec<ScoreEvent>>,
}

impl RecordingBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ScoreEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Broadcaster for RecordingBroadcaster {
    fn publish(&self, event: &ScoreEvent) -> Result<(), BroadcastError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}
