use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a follow-up value the router can wait for (e.g. "order_id").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotName(pub String);

impl SlotName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlotName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Format rule a slot value must satisfy before the router consumes it.
#[derive(Debug, Clone)]
pub enum SlotRule {
    /// Whole value must match the expression (anchor it in the pattern).
    Pattern(Regex),
    /// Any non-blank text.
    AnyText,
}

impl SlotRule {
    pub fn pattern(expr: &str) -> Result<Self, regex::Error> {
        Ok(SlotRule::Pattern(Regex::new(expr)?))
    }

    pub fn accepts(&self, value: &str) -> bool {
        match self {
            SlotRule::Pattern(re) => re.is_match(value),
            SlotRule::AnyText => !value.trim().is_empty(),
        }
    }
}

/// Slot rules in declaration order.
#[derive(Debug, Clone, Default)]
pub struct SlotTable {
    rules: Vec<(SlotName, SlotRule)>,
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule. Returns false (and keeps the existing rule) if the
    /// slot is already declared.
    pub fn insert(&mut self, slot: SlotName, rule: SlotRule) -> bool {
        if self.contains(&slot) {
            return false;
        }
        self.rules.push((slot, rule));
        true
    }

    pub fn contains(&self, slot: &SlotName) -> bool {
        self.rules.iter().any(|(name, _)| name == slot)
    }

    pub fn rule(&self, slot: &SlotName) -> Option<&SlotRule> {
        self.rules
            .iter()
            .find(|(name, _)| name == slot)
            .map(|(_, rule)| rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
