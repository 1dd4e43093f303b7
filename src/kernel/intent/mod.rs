pub mod classifier;
pub mod similarity;
pub mod types;

pub use classifier::IntentClassifier;
pub use similarity::{best_match, best_match_by, normalize, sequence_ratio, similarity_ratio, BestMatch};
pub use types::{IntentName, MatchKind, MatchOutcome};
