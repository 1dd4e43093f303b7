use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical intent identifier, e.g. "order_status".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntentName(pub String);

impl IntentName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IntentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IntentName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Which classifier stage produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchKind {
    Exact,
    Fuzzy,
    Keyword,
}

/// Result of classifying one utterance. Callers must handle `NoMatch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Matched {
        intent: IntentName,
        /// 0.0 - 1.0. Exact and keyword matches score 1.0.
        score: f64,
        kind: MatchKind,
    },
    NoMatch,
}

impl MatchOutcome {
    pub fn intent(&self) -> Option<&IntentName> {
        match self {
            MatchOutcome::Matched { intent, .. } => Some(intent),
            MatchOutcome::NoMatch => None,
        }
    }

    pub fn kind(&self) -> Option<MatchKind> {
        match self {
            MatchOutcome::Matched { kind, .. } => Some(*kind),
            MatchOutcome::NoMatch => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched { .. })
    }
}
