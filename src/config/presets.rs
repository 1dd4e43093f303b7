use std::fmt;
use std::str::FromStr;

use super::error::ConfigError;

const SUPPORT: &str = include_str!("../../presets/support.toml");
const COMMANDS: &str = include_str!("../../presets/commands.toml");
const FAQ: &str = include_str!("../../presets/faq.toml");

/// Bot configurations compiled into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Order status / refund dialogue with follow-up slots.
    Support,
    /// Single-shot command bot (cancel, postpone, reschedule, ...).
    Commands,
    /// FAQ knowledge base with a greeting.
    Faq,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Support, Preset::Commands, Preset::Faq];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Support => "support",
            Preset::Commands => "commands",
            Preset::Faq => "faq",
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            Preset::Support => SUPPORT,
            Preset::Commands => COMMANDS,
            Preset::Faq => FAQ,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}
