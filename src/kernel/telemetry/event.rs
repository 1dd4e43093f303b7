use serde::{Deserialize, Serialize};

use crate::kernel::intent::MatchOutcome;
use crate::kernel::slots::SlotName;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    IntentResolved {
        kind: ResolutionKind,
    },

    SlotLifecycle {
        slot: SlotName,
        event: SlotEventKind,
    },

    FaqLookup {
        hit: bool,
    },

    /// Default reply was used.
    Fallback,

    SessionReset,

    SessionSummary {
        turns: u64,
        fallback_ratio: f32,
        slots_filled: u64,
        faq_hits: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionKind {
    Exact,
    Fuzzy,
    Keyword,
    NoMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotEventKind {
    Opened,
    Filled,
    Rejected,
}

impl From<&MatchOutcome> for ResolutionKind {
    fn from(outcome: &MatchOutcome) -> Self {
        use crate::kernel::intent::MatchKind;

        // Intent and score STRIPPED
        match outcome.kind() {
            Some(MatchKind::Exact) => ResolutionKind::Exact,
            Some(MatchKind::Fuzzy) => ResolutionKind::Fuzzy,
            Some(MatchKind::Keyword) => ResolutionKind::Keyword,
            None => ResolutionKind::NoMatch,
        }
    }
}
