use std::collections::HashMap;

use crate::kernel::intent::similarity::normalize;
use crate::kernel::intent::IntentName;
use crate::kernel::slots::SlotName;

#[derive(Debug, Clone)]
pub struct AliasEntry {
    pub intent: IntentName,
    /// Normalized, deduplicated, declaration order.
    pub aliases: Vec<String>,
    pub keywords: Vec<String>,
}

/// Intent -> recognized surface strings. Iteration order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an intent. Aliases and keywords are normalized; blanks and
    /// repeats are dropped. Returns false if the intent already exists.
    pub fn insert<S: AsRef<str>>(&mut self, intent: IntentName, aliases: &[S], keywords: &[S]) -> bool {
        if self.contains(&intent) {
            return false;
        }
        self.entries.push(AliasEntry {
            intent,
            aliases: normalized_set(aliases),
            keywords: normalized_set(keywords),
        });
        true
    }

    pub fn contains(&self, intent: &IntentName) -> bool {
        self.entries.iter().any(|e| &e.intent == intent)
    }

    pub fn get(&self, intent: &IntentName) -> Option<&AliasEntry> {
        self.entries.iter().find(|e| &e.intent == intent)
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First intent whose alias set contains `normalized`.
    pub fn exact(&self, normalized: &str) -> Option<&IntentName> {
        self.entries
            .iter()
            .find(|e| e.aliases.iter().any(|a| a == normalized))
            .map(|e| &e.intent)
    }

    /// Every alias paired with its intent, in table order.
    pub fn alias_union(&self) -> Vec<(&IntentName, &str)> {
        self.entries
            .iter()
            .flat_map(|e| e.aliases.iter().map(move |a| (&e.intent, a.as_str())))
            .collect()
    }

    /// First intent with a keyword contained in `normalized`.
    pub fn keyword(&self, normalized: &str) -> Option<&IntentName> {
        self.entries
            .iter()
            .find(|e| e.keywords.iter().any(|k| normalized.contains(k.as_str())))
            .map(|e| &e.intent)
    }
}

fn normalized_set<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let n = normalize(item.as_ref());
        if !n.is_empty() && !out.contains(&n) {
            out.push(n);
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResponseKey {
    Intent(IntentName),
    SlotFilled(SlotName),
    SlotReprompt(SlotName),
    Fallback,
}

/// Canned reply templates. Templates may reference `{input}`.
#[derive(Debug, Clone, Default)]
pub struct ResponseTable {
    templates: HashMap<ResponseKey, String>,
}

impl ResponseTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ResponseKey, template: impl Into<String>) {
        self.templates.insert(key, template.into());
    }

    pub fn get(&self, key: &ResponseKey) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    pub fn render(&self, key: &ResponseKey, vars: &[(&str, &str)]) -> Option<String> {
        self.get(key).map(|template| render_template(template, vars))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Single-pass `{name}` substitution. Unknown placeholders are left as-is and
/// substituted values are never re-scanned.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match tail.find('}') {
            Some(close) => {
                let key = &tail[1..close];
                match vars.iter().find(|(name, _)| *name == key) {
                    Some((_, value)) => out.push_str(value),
                    None => out.push_str(&tail[..=close]),
                }
                rest = &tail[close + 1..];
            }
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
