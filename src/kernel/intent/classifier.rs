use std::sync::Arc;
use tracing::debug;

use super::similarity::{best_match, normalize};
use super::types::{MatchKind, MatchOutcome};
use crate::config::BotConfig;

/// Maps free text onto the closed intent set of a `BotConfig`.
///
/// Stages, first hit wins:
/// 1. exact alias (after trim + lowercase), table order
/// 2. fuzzy alias, best ratio over the alias union, if >= `fuzzy_threshold`
/// 3. keyword substring, table order, only when `substring_fallback` is on
///
/// Classification is pure. The same utterance against the same config
/// always yields the same outcome.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    config: Arc<BotConfig>,
}

impl IntentClassifier {
    pub fn new(config: Arc<BotConfig>) -> Self {
        Self { config }
    }

    pub fn classify(&self, utterance: &str) -> MatchOutcome {
        let normalized = normalize(utterance);
        if normalized.is_empty() {
            return MatchOutcome::NoMatch;
        }

        let table = &self.config.aliases;

        // 1. Exact
        if let Some(intent) = table.exact(&normalized) {
            debug!(intent = %intent, "exact alias match");
            return MatchOutcome::Matched {
                intent: intent.clone(),
                score: 1.0,
                kind: MatchKind::Exact,
            };
        }

        // 2. Fuzzy
        let union = table.alias_union();
        let threshold = self.config.matching.fuzzy_threshold;
        if let Some(best) = best_match(&normalized, union.iter().map(|(_, alias)| *alias), threshold) {
            let intent = union[best.index].0.clone();
            debug!(intent = %intent, alias = %best.candidate, score = best.score, "fuzzy alias match");
            return MatchOutcome::Matched {
                intent,
                score: best.score,
                kind: MatchKind::Fuzzy,
            };
        }

        // 3. Keyword containment
        if self.config.matching.substring_fallback {
            if let Some(intent) = table.keyword(&normalized) {
                debug!(intent = %intent, "keyword match");
                return MatchOutcome::Matched {
                    intent: intent.clone(),
                    score: 1.0,
                    kind: MatchKind::Keyword,
                };
            }
        }

        MatchOutcome::NoMatch
    }
}
