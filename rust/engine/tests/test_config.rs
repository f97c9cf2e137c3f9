use std::io::Write;

use holdem_engine::config::{self, ConfigError, TableConfig, ValueSource};
use serial_test::serial;

const ENV_VARS: [&str; 5] = [
    "HOLDEM_CONFIG",
    "HOLDEM_SEATS",
    "HOLDEM_MIN_BET",
    "HOLDEM_STARTING_CHIPS",
    "HOLDEM_SEED",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

#[test]
fn defaults_are_a_six_seat_table() {
    let cfg = TableConfig::default();
    assert_eq!(cfg.seats, 6);
    assert_eq!(cfg.min_bet, 5);
    assert_eq!(cfg.starting_chips, 500);
    assert_eq!(cfg.seed, None);
    assert!(cfg.validate().is_ok());
}

#[test]
fn toml_fills_missing_fields_with_defaults() {
    let cfg = TableConfig::from_toml_str("seats = 9\nseed = 42\n").unwrap();
    assert_eq!(cfg.seats, 9);
    assert_eq!(cfg.seed, Some(42));
    assert_eq!(cfg.min_bet, 5);
}

#[test]
fn invalid_values_are_rejected() {
    for toml in [
        "seats = 1",
        "seats = 11",
        "min_bet = 0",
        "min_bet = 50\nstarting_chips = 60",
    ] {
        match TableConfig::from_toml_str(toml) {
            Err(ConfigError::Invalid(_)) => {}
            other => panic!("expected Invalid for {toml:?}, got {other:?}"),
        }
    }
    assert!(matches!(
        TableConfig::from_toml_str("seats = \"six\""),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn load_reads_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "min_bet = 25\nstarting_chips = 1000").unwrap();

    let cfg = TableConfig::load(file.path()).unwrap();
    assert_eq!(cfg.min_bet, 25);
    assert_eq!(cfg.starting_chips, 1000);

    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        TableConfig::load(dir.path().join("missing.toml")),
        Err(ConfigError::Io(_))
    ));
}

#[test]
#[serial]
fn env_overrides_file_which_overrides_defaults() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "seats = 4\nmin_bet = 10\nstarting_chips = 800").unwrap();
    std::env::set_var("HOLDEM_CONFIG", file.path());
    std::env::set_var("HOLDEM_MIN_BET", "20");

    let resolved = config::load_with_sources().unwrap();
    clear_env();

    assert_eq!(resolved.config.seats, 4);
    assert_eq!(resolved.config.min_bet, 20);
    assert_eq!(resolved.config.starting_chips, 800);
    assert_eq!(resolved.sources.seats, ValueSource::File);
    assert_eq!(resolved.sources.min_bet, ValueSource::Env);
    assert_eq!(resolved.sources.seed, ValueSource::Default);
}

#[test]
#[serial]
fn env_values_must_parse_and_validate() {
    clear_env();
    std::env::set_var("HOLDEM_SEED", "not-a-number");
    let err = config::load().unwrap_err();
    clear_env();
    assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("HOLDEM_SEED")));

    std::env::set_var("HOLDEM_SEATS", "12");
    let err = config::load().unwrap_err();
    clear_env();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
#[serial]
fn without_overrides_load_returns_defaults() {
    clear_env();
    let resolved = config::load_with_sources().unwrap();
    assert_eq!(resolved.config, TableConfig::default());
    assert_eq!(resolved.sources.starting_chips, ValueSource::Default);
}
