use serde::{Deserialize, Serialize};

/// Logical turn counter. Turn 0 is the session preamble (greeting),
/// user turns start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Turn {
    pub index: u64,
}

impl Turn {
    pub fn new() -> Self {
        Turn { index: 0 }
    }

    pub fn next(&self) -> Self {
        Turn { index: self.index + 1 }
    }
}

impl Default for Turn {
    fn default() -> Self {
        Self::new()
    }
}
