use std::sync::Arc;

use helpdesk::config::{BotConfig, Preset};
use helpdesk::kernel::intent::similarity::{
    best_match, best_match_by, indel_distance, sequence_ratio, similarity_ratio,
};
use helpdesk::kernel::intent::{IntentClassifier, IntentName, MatchKind, MatchOutcome};

fn classifier(preset: Preset) -> IntentClassifier {
    let config = BotConfig::preset(preset).expect("preset should compile");
    IntentClassifier::new(Arc::new(config))
}

fn classifier_from(toml: &str) -> IntentClassifier {
    let config = BotConfig::from_toml_str(toml).expect("config should compile");
    IntentClassifier::new(Arc::new(config))
}

#[test]
fn test_every_alias_matches_exactly_in_any_case() {
    for preset in Preset::ALL {
        let config = BotConfig::preset(preset).unwrap();
        let classifier = IntentClassifier::new(Arc::new(config.clone()));

        for entry in config.aliases.entries() {
            for alias in &entry.aliases {
                for variant in [alias.clone(), alias.to_uppercase(), format!("  {}\t", alias)] {
                    match classifier.classify(&variant) {
                        MatchOutcome::Matched { intent, score, kind } => {
                            assert_eq!(intent, entry.intent, "alias {:?} ({})", variant, preset);
                            assert_eq!(kind, MatchKind::Exact);
                            assert_eq!(score, 1.0);
                        }
                        MatchOutcome::NoMatch => panic!("alias {:?} should match {}", variant, entry.intent),
                    }
                }
            }
        }
    }
}

#[test]
fn test_dissimilar_input_is_no_match() {
    let c = classifier(Preset::Commands);

    for input in ["zzzz", "xyzzy", "", "   "] {
        assert_eq!(c.classify(input), MatchOutcome::NoMatch, "input {:?}", input);
    }
}

#[test]
fn test_typos_resolve_by_fuzzy_match() {
    let c = classifier(Preset::Commands);

    let cases = [("cancl", "cancel"), ("refnd", "refund"), ("reschedul", "reschedule"), ("Hlep", "help")];
    for (input, expected) in cases {
        match c.classify(input) {
            MatchOutcome::Matched { intent, kind, score } => {
                assert_eq!(intent, IntentName::from(expected), "input {:?}", input);
                assert_eq!(kind, MatchKind::Fuzzy);
                assert!(score >= 0.6 && score < 1.0, "score {} for {:?}", score, input);
            }
            MatchOutcome::NoMatch => panic!("{:?} should fuzzy-match {}", input, expected),
        }
    }
}

#[test]
fn test_threshold_gates_fuzzy_matches() {
    // "cancl" vs "cancel" scores 10/11 ~ 0.909
    let lenient = classifier_from(
        r#"
name = "lenient"
[matching]
fuzzy_threshold = 0.9
[[intents]]
name = "cancel"
aliases = ["cancel"]
reply = "ok"
"#,
    );
    let strict = classifier_from(
        r#"
name = "strict"
[matching]
fuzzy_threshold = 0.95
[[intents]]
name = "cancel"
aliases = ["cancel"]
reply = "ok"
"#,
    );

    assert_eq!(lenient.classify("cancl").intent(), Some(&IntentName::from("cancel")));
    assert_eq!(strict.classify("cancl"), MatchOutcome::NoMatch);
    assert!(strict.classify("cancel").is_match());
}

#[test]
fn test_fuzzy_ties_keep_table_order() {
    let c = classifier_from(
        r#"
name = "tie"
[[intents]]
name = "first"
aliases = ["abcd"]
reply = "1"

[[intents]]
name = "second"
aliases = ["abce"]
reply = "2"
"#,
    );

    assert_eq!(c.classify("abc").intent(), Some(&IntentName::from("first")));
}

#[test]
fn test_keyword_fallback_runs_after_fuzzy() {
    let support = classifier(Preset::Support);

    match support.classify("My package delivery seems late") {
        MatchOutcome::Matched { intent, kind, .. } => {
            assert_eq!(intent, IntentName::from("shipping_info"));
            assert_eq!(kind, MatchKind::Keyword);
        }
        MatchOutcome::NoMatch => panic!("keyword `delivery` should match"),
    }

    // Commands preset has no keyword stage
    let commands = classifier(Preset::Commands);
    assert_eq!(commands.classify("My package delivery seems late"), MatchOutcome::NoMatch);
}

#[test]
fn test_classification_is_idempotent() {
    let c = classifier(Preset::Support);

    for input in ["track order", "Where is my ordr", "I want a refund", "hello there"] {
        let first = c.classify(input);
        let second = c.classify(input);
        assert_eq!(first, second, "input {:?}", input);
    }
}

#[test]
fn test_similarity_ratio_values() {
    assert!((similarity_ratio("postpne", "postpone") - 14.0 / 15.0).abs() < 1e-9);
    assert_eq!(similarity_ratio("", ""), 1.0);
    assert_eq!(similarity_ratio("abc", "xyz"), 0.0);
    assert_eq!(similarity_ratio("same", "same"), 1.0);
    assert_eq!(indel_distance("kitten", "sitting"), 5);
    // chars, not bytes
    assert_eq!(indel_distance("café", "cafe"), 2);
}

#[test]
fn test_best_match_threshold_and_index() {
    let candidates = ["stop", "status", "start"];

    let hit = best_match("statu", candidates, 0.6).expect("should match `status`");
    assert_eq!(hit.index, 1);
    assert_eq!(hit.candidate, "status");

    assert!(best_match("qqqq", candidates, 0.6).is_none());
    assert!(best_match("anything", Vec::<&str>::new(), 0.0).is_none());
}

#[test]
fn test_sequence_ratio_values() {
    assert_eq!(sequence_ratio("abcd", "bcde"), 0.75);
    assert_eq!(sequence_ratio("ab", "ba"), 0.5);
    assert_eq!(sequence_ratio("", ""), 1.0);
    assert_eq!(sequence_ratio("abc", "xyz"), 0.0);

    // Scattered common letters count for the subsequence ratio, not for blocks
    let question = "which payment methods do you accept?";
    let chatter = "can i talk to a human please";
    assert!(similarity_ratio(question, chatter) > 0.4);
    assert!(sequence_ratio(question, chatter) < 0.2);
}

#[test]
fn test_best_match_by_uses_given_scorer() {
    let questions = ["how do i track my order?", "what is your return policy?"];

    let hit = best_match_by("how can i track my order", questions, 0.4, |q, c| sequence_ratio(c, q))
        .expect("close question");
    assert_eq!(hit.index, 0);
    assert!((hit.score - 0.875).abs() < 1e-9);

    assert!(best_match_by("can i talk to a human please", questions, 0.4, |q, c| sequence_ratio(c, q)).is_none());
}
