use std::path::PathBuf;
use thiserror::Error;

use crate::faq::FaqError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("intent and slot names must not be empty")]
    EmptyName,

    #[error("duplicate intent `{0}`")]
    DuplicateIntent(String),

    #[error("duplicate slot `{0}`")]
    DuplicateSlot(String),

    #[error("intent `{0}` has neither aliases nor keywords")]
    EmptyIntent(String),

    #[error("intent `{intent}` expects unknown slot `{slot}`")]
    UnknownSlot { intent: String, slot: String },

    #[error("slot `{slot}` has an invalid pattern: {source}")]
    InvalidPattern {
        slot: String,
        #[source]
        source: regex::Error,
    },

    #[error("fuzzy_threshold must be within 0.0..=1.0, got {0}")]
    ThresholdOutOfRange(f64),

    #[error("unknown preset `{0}` (expected one of: support, commands, faq)")]
    UnknownPreset(String),

    #[error(transparent)]
    Faq(#[from] FaqError),
}
