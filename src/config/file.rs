//! On-disk TOML shape. Deserialized as-is, then compiled into `BotConfig`.

use serde::{Deserialize, Serialize};

use crate::faq::FaqFile;

pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.6;

fn default_threshold() -> f64 {
    DEFAULT_FUZZY_THRESHOLD
}

fn default_reply() -> String {
    "I didn't understand that. Could you rephrase?".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfigFile {
    pub name: String,
    #[serde(default)]
    pub greeting: Option<String>,
    #[serde(default = "default_reply")]
    pub default_reply: String,
    #[serde(default)]
    pub matching: MatchingSection,
    #[serde(default)]
    pub intents: Vec<IntentSection>,
    #[serde(default)]
    pub slots: Vec<SlotSection>,
    #[serde(default)]
    pub faq: Option<FaqFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchingSection {
    #[serde(default = "default_threshold")]
    pub fuzzy_threshold: f64,
    #[serde(default)]
    pub substring_fallback: bool,
}

impl Default for MatchingSection {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            substring_fallback: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntentSection {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub reply: String,
    /// Slot to open after replying.
    #[serde(default)]
    pub expects: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotSection {
    pub name: String,
    /// Regular expression the trimmed value must match. Omitted means any
    /// non-blank text is accepted.
    #[serde(default)]
    pub pattern: Option<String>,
    pub filled: String,
    pub reprompt: String,
}
