use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::state::{DialogState, SessionState};
use super::telemetry::metrics::TelemetrySnapshot;
use super::telemetry::recorder::TelemetryRecorder;
use super::transcript::Transcript;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Session-scoped context handed to the router on every turn.
/// Nothing in here is shared between sessions.
#[derive(Debug, Default)]
pub struct Session {
    pub id: SessionId,
    pub state: SessionState,
    pub telemetry: TelemetryRecorder,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialog(&self) -> &DialogState {
        self.state.dialog()
    }

    pub fn transcript(&self) -> &Transcript {
        self.state.transcript()
    }

    pub fn report(&self) -> SessionReport {
        SessionReport {
            id: self.id,
            turns: self.state.turn().index,
            dialog: self.state.dialog().clone(),
            transcript: self.state.transcript().clone(),
            telemetry: self.telemetry.snapshot(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionReport {
    pub id: SessionId,
    pub turns: u64,
    pub dialog: DialogState,
    pub transcript: Transcript,
    pub telemetry: TelemetrySnapshot,
}
