use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::event::Message;

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("failed to write transcript {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize transcript: {0}")]
    Json(#[from] serde_json::Error),
}

/// Append-only message log of one session, in display order.
/// Unbounded for the lifetime of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    entries: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    // Mutation only through `SessionState::reduce`.
    pub(crate) fn push(&mut self, message: Message) {
        self.entries.push(message);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[Message] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Result<String, TranscriptError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), TranscriptError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| TranscriptError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
