use std::str::FromStr;

use helpdesk::config::{render_template, BotConfig, ConfigError, Preset, ResponseKey};
use helpdesk::kernel::intent::IntentName;
use helpdesk::kernel::slots::SlotName;

#[test]
fn test_presets_compile() {
    for preset in Preset::ALL {
        let config = BotConfig::preset(preset).unwrap_or_else(|e| panic!("{}: {}", preset, e));
        assert!(!config.aliases.is_empty(), "{} has intents", preset);
        assert!(config.responses.get(&ResponseKey::Fallback).is_some());
    }

    let support = BotConfig::preset(Preset::Support).unwrap();
    assert!(support.matching.substring_fallback);
    assert_eq!(support.slots.len(), 2);
    assert_eq!(
        support.expected_slot(&IntentName::from("order_status")),
        Some(&SlotName::from("order_id"))
    );
    assert_eq!(support.expected_slot(&IntentName::from("shipping_info")), None);

    let faq = BotConfig::preset(Preset::Faq).unwrap();
    assert!(faq.greeting.is_some());
    assert_eq!(faq.faq.as_ref().map(|f| f.len()), Some(5));
}

#[test]
fn test_preset_names_parse() {
    assert_eq!(Preset::from_str("support").unwrap(), Preset::Support);
    assert_eq!(Preset::from_str(" COMMANDS ").unwrap(), Preset::Commands);
    assert_eq!("faq".parse::<Preset>().unwrap(), Preset::Faq);
    assert!(matches!(Preset::from_str("nope"), Err(ConfigError::UnknownPreset(_))));
}

#[test]
fn test_defaults_when_sections_are_omitted() {
    let config = BotConfig::from_toml_str(
        r#"
name = "minimal"
greeting = "   "

[[intents]]
name = "hi"
aliases = [" Hello ", "HELLO", "hi"]
reply = "Hi!"
"#,
    )
    .unwrap();

    assert_eq!(config.matching.fuzzy_threshold, 0.6);
    assert!(!config.matching.substring_fallback);
    assert!(config.greeting.is_none(), "blank greeting is dropped");
    assert!(config.faq.is_none());

    // Normalized and deduplicated
    let entry = config.aliases.get(&IntentName::from("hi")).unwrap();
    assert_eq!(entry.aliases, vec!["hello".to_string(), "hi".to_string()]);
    assert_eq!(config.aliases.exact("hello"), Some(&IntentName::from("hi")));
}

fn compile_err(source: &str) -> ConfigError {
    match BotConfig::from_toml_str(source) {
        Ok(_) => panic!("expected an error for:\n{}", source),
        Err(e) => e,
    }
}

#[test]
fn test_duplicate_names_are_rejected() {
    let err = compile_err(
        r#"
name = "dup"
[[intents]]
name = "a"
aliases = ["x"]
reply = "1"
[[intents]]
name = "a"
aliases = ["y"]
reply = "2"
"#,
    );
    assert!(matches!(&err, ConfigError::DuplicateIntent(n) if n == "a"), "{:?}", err);

    let err = compile_err(
        r#"
name = "dup slot"
[[slots]]
name = "s"
filled = "ok"
reprompt = "again"
[[slots]]
name = "s"
filled = "ok"
reprompt = "again"
"#,
    );
    assert!(matches!(&err, ConfigError::DuplicateSlot(n) if n == "s"), "{:?}", err);
}

#[test]
fn test_slot_references_and_patterns_are_checked() {
    let err = compile_err(
        r#"
name = "unknown slot"
[[intents]]
name = "a"
aliases = ["x"]
reply = "1"
expects = "ghost"
"#,
    );
    assert!(matches!(&err, ConfigError::UnknownSlot { slot, .. } if slot == "ghost"), "{:?}", err);

    let err = compile_err(
        r#"
name = "bad regex"
[[slots]]
name = "s"
pattern = "^[a-z"
filled = "ok"
reprompt = "again"
"#,
    );
    assert!(matches!(&err, ConfigError::InvalidPattern { slot, .. } if slot == "s"), "{:?}", err);
}

#[test]
fn test_malformed_values_are_rejected() {
    let err = compile_err(
        r#"
name = "threshold"
[matching]
fuzzy_threshold = 1.5
"#,
    );
    assert!(matches!(err, ConfigError::ThresholdOutOfRange(_)), "{:?}", err);

    let err = compile_err(
        r#"
name = "empty"
[[intents]]
name = "a"
aliases = [" "]
reply = "1"
"#,
    );
    assert!(matches!(&err, ConfigError::EmptyIntent(n) if n == "a"), "{:?}", err);

    let err = compile_err(
        r#"
name = "nameless"
[[intents]]
name = "  "
aliases = ["x"]
reply = "1"
"#,
    );
    assert!(matches!(err, ConfigError::EmptyName), "{:?}", err);

    let err = compile_err(
        r#"
name = "typo"
defualt_reply = "oops"
"#,
    );
    assert!(matches!(err, ConfigError::Parse(_)), "{:?}", err);

    let err = compile_err(
        r#"
name = "faq"
[faq]
cutoff = -0.1
"#,
    );
    assert!(matches!(err, ConfigError::Faq(_)), "{:?}", err);
}

#[test]
fn test_from_file_reads_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bot.toml");
    std::fs::write(&path, Preset::Commands.source()).unwrap();

    let config = BotConfig::from_file(&path).unwrap();
    assert_eq!(config.name, "Customer Service Bot");
    assert_eq!(config.aliases.len(), 6);

    let missing = BotConfig::from_file(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(missing, ConfigError::Io { .. }));
}

#[test]
fn test_render_template() {
    assert_eq!(render_template("Order {input} found.", &[("input", "AB12345")]), "Order AB12345 found.");
    assert_eq!(render_template("{unknown} stays", &[("input", "x")]), "{unknown} stays");
    assert_eq!(render_template("unterminated {input", &[("input", "x")]), "unterminated {input");
    // Substituted text is not expanded again
    assert_eq!(render_template("[{input}]", &[("input", "{input}")]), "[{input}]");
    assert_eq!(
        render_template("{a}{b}", &[("a", "1"), ("b", "2")]),
        "12"
    );
}
