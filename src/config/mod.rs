//! Bot configuration: the alias, response and slot tables the router runs on.
//!
//! Loaded once (TOML file or embedded preset), validated, then shared
//! read-only behind an `Arc`. Nothing here changes after startup.

pub mod error;
pub mod file;
pub mod presets;
pub mod tables;

use std::collections::HashMap;
use std::path::Path;
use tracing::info;

pub use error::ConfigError;
pub use file::{BotConfigFile, IntentSection, MatchingSection, SlotSection, DEFAULT_FUZZY_THRESHOLD};
pub use presets::Preset;
pub use tables::{render_template, AliasEntry, AliasTable, ResponseKey, ResponseTable};

use crate::faq::FaqBook;
use crate::kernel::intent::IntentName;
use crate::kernel::slots::{SlotName, SlotRule, SlotTable};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchSettings {
    /// Minimum similarity ratio for a fuzzy alias match.
    pub fuzzy_threshold: f64,
    /// Run the keyword containment stage after fuzzy matching.
    pub substring_fallback: bool,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            substring_fallback: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub name: String,
    pub greeting: Option<String>,
    pub matching: MatchSettings,
    pub aliases: AliasTable,
    pub responses: ResponseTable,
    pub slots: SlotTable,
    /// Intent -> slot opened after its reply.
    expects: HashMap<IntentName, SlotName>,
    pub faq: Option<FaqBook>,
}

impl BotConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let file: BotConfigFile = toml::from_str(source)?;
        Self::compile(file)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        info!(path = %path.display(), bot = %config.name, "loaded bot config");
        Ok(config)
    }

    pub fn preset(preset: Preset) -> Result<Self, ConfigError> {
        Self::from_toml_str(preset.source())
    }

    /// Validates the raw file and builds the lookup tables.
    pub fn compile(file: BotConfigFile) -> Result<Self, ConfigError> {
        let threshold = file.matching.fuzzy_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::ThresholdOutOfRange(threshold));
        }

        let mut responses = ResponseTable::new();

        let mut slots = SlotTable::new();
        for section in file.slots {
            let name = section.name.trim();
            if name.is_empty() {
                return Err(ConfigError::EmptyName);
            }
            let slot = SlotName::new(name);
            let rule = match section.pattern.as_deref() {
                Some(expr) => SlotRule::pattern(expr).map_err(|source| ConfigError::InvalidPattern {
                    slot: slot.to_string(),
                    source,
                })?,
                None => SlotRule::AnyText,
            };
            if !slots.insert(slot.clone(), rule) {
                return Err(ConfigError::DuplicateSlot(slot.to_string()));
            }
            responses.insert(ResponseKey::SlotFilled(slot.clone()), section.filled);
            responses.insert(ResponseKey::SlotReprompt(slot), section.reprompt);
        }

        let mut aliases = AliasTable::new();
        let mut expects = HashMap::new();
        for section in file.intents {
            let name = section.name.trim();
            if name.is_empty() {
                return Err(ConfigError::EmptyName);
            }
            let intent = IntentName::new(name);
            if aliases.contains(&intent) {
                return Err(ConfigError::DuplicateIntent(intent.to_string()));
            }

            let blank = |items: &[String]| items.iter().all(|s| s.trim().is_empty());
            if blank(&section.aliases) && blank(&section.keywords) {
                return Err(ConfigError::EmptyIntent(intent.to_string()));
            }

            if let Some(expected) = section.expects.as_deref() {
                let slot = SlotName::new(expected.trim());
                if !slots.contains(&slot) {
                    return Err(ConfigError::UnknownSlot {
                        intent: intent.to_string(),
                        slot: slot.to_string(),
                    });
                }
                expects.insert(intent.clone(), slot);
            }

            responses.insert(ResponseKey::Intent(intent.clone()), section.reply);
            aliases.insert(intent, &section.aliases, &section.keywords);
        }

        responses.insert(ResponseKey::Fallback, file.default_reply);

        let faq = file.faq.map(FaqBook::compile).transpose()?;

        Ok(Self {
            name: file.name,
            greeting: file.greeting.filter(|g| !g.trim().is_empty()),
            matching: MatchSettings {
                fuzzy_threshold: threshold,
                substring_fallback: file.matching.substring_fallback,
            },
            aliases,
            responses,
            slots,
            expects,
            faq,
        })
    }

    /// Replaces (or attaches) the FAQ knowledge base.
    pub fn with_faq(mut self, faq: FaqBook) -> Self {
        self.faq = Some(faq);
        self
    }

    pub fn expected_slot(&self, intent: &IntentName) -> Option<&SlotName> {
        self.expects.get(intent)
    }

    pub fn slot_rule(&self, slot: &SlotName) -> Option<&SlotRule> {
        self.slots.rule(slot)
    }
}
