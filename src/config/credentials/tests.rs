use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_bot_token_env_sets_telegram_token() {
    let mut config = Config::default();
    apply_overrides_with(&mut config, lookup_from(&[("TELEGRAM_BOT_TOKEN", "42:xyz")]));
    assert_eq!(config.telegram.token, "42:xyz");
}

#[test]
fn test_prefixed_env_var_also_accepted() {
    let mut config = Config::default();
    apply_overrides_with(
        &mut config,
        lookup_from(&[("NAVIGATOR_TELEGRAM_TOKEN", "7:abc")]),
    );
    assert_eq!(config.telegram.token, "7:abc");
}

#[test]
fn test_bot_token_wins_over_prefixed_var() {
    let mut config = Config::default();
    apply_overrides_with(
        &mut config,
        lookup_from(&[
            ("NAVIGATOR_TELEGRAM_TOKEN", "old"),
            ("TELEGRAM_BOT_TOKEN", "new"),
        ]),
    );
    assert_eq!(config.telegram.token, "new");
}

#[test]
fn test_empty_env_value_keeps_file_value() {
    let mut config = Config::default();
    config.telegram.token = "from-file".to_string();
    apply_overrides_with(&mut config, lookup_from(&[("TELEGRAM_BOT_TOKEN", "")]));
    assert_eq!(config.telegram.token, "from-file");
}

#[test]
fn test_unknown_slot_has_no_field() {
    let mut config = Config::default();
    assert!(get_credential_field(&mut config, "discord-token").is_none());
    assert!(get_credential_value(&config, "discord-token").is_none());
}

#[test]
fn test_configured_credentials_lists_filled_slots() {
    let mut config = Config::default();
    assert!(configured_credentials(&config).is_empty());
    config.telegram.token = "t".to_string();
    assert_eq!(
        configured_credentials(&config),
        vec!["telegram-token", "telegram-bot-token"]
    );
}
