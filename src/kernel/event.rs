use serde::{Deserialize, Serialize};

use super::intent::IntentName;
use super::slots::SlotName;
use super::time::Turn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
    pub turn: Turn,
}

impl Message {
    pub fn user(text: &str, turn: Turn) -> Self {
        Self {
            role: Role::User,
            text: text.to_string(),
            turn,
        }
    }

    pub fn assistant(text: &str, turn: Turn) -> Self {
        Self {
            role: Role::Assistant,
            text: text.to_string(),
            turn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Transcript,
    Stats,
}

/// Everything the reactor can be asked to do.
#[derive(Debug, Clone)]
pub enum Event {
    /// A user utterance.
    Input(InputEvent),
    /// Drop dialogue state and transcript, start over.
    Reset,
    Report(ReportKind),
    Shutdown,
}

#[derive(Debug, Clone)]
pub struct InputEvent {
    pub source: String,
    pub text: String,
}

impl InputEvent {
    pub fn text(source: &str, text: &str) -> Self {
        Self {
            source: source.to_string(),
            text: text.to_string(),
        }
    }
}

/// What the router decided for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Canned reply for an intent, no follow-up.
    Answered { intent: IntentName },
    /// Reply for an intent that now waits for `slot`.
    SlotRequested { intent: IntentName, slot: SlotName },
    SlotFilled { slot: SlotName, value: String },
    /// Value failed the slot rule; still waiting.
    SlotRejected { slot: SlotName },
    FaqAnswered { question: String },
    TopicsSuggested,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub turn: Turn,
    pub text: String,
    pub outcome: TurnOutcome,
}
