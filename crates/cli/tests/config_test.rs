use {
    clap::Parser,
    coin_tui::{
        args::Args,
        config::{AppConfig, DEFAULT_REFRESH_SECS, MIN_REFRESH_SECS},
        discovery::state::Density,
    },
    coingecko_api::{
        Currency,
        markets::{COINGECKO_API_BASE, MAX_PER_PAGE},
    },
    std::time::Duration,
};

fn temp_config_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir()
        .join(format!("coin-tui-test-{}-{}", name, std::process::id()))
        .join("config.json")
}

#[test]
fn test_missing_file_yields_defaults() {
    let path = temp_config_path("missing");
    let config = AppConfig::load_from(&path).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.currency, Currency::Usd);
    assert_eq!(config.refresh_secs, DEFAULT_REFRESH_SECS);
    assert_eq!(config.api_base, COINGECKO_API_BASE);
}

#[test]
fn test_save_and_load_round_trip() {
    let path = temp_config_path("roundtrip");
    let config = AppConfig {
        currency: Currency::Inr,
        density: Density::Compact,
        refresh_secs: 30,
        ..Default::default()
    };
    config.save_to(&path).unwrap();

    let loaded = AppConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_partial_file_fills_defaults() {
    let path = temp_config_path("partial");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, r#"{"currency": "inr"}"#).unwrap();

    let loaded = AppConfig::load_from(&path).unwrap();
    assert_eq!(loaded.currency, Currency::Inr);
    assert_eq!(loaded.density, Density::Comfortable);
    assert_eq!(loaded.refresh_secs, DEFAULT_REFRESH_SECS);

    std::fs::write(&path, "not json").unwrap();
    assert!(AppConfig::load_from(&path).is_err());

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_args_override_file_values() {
    let args = Args::try_parse_from([
        "coin-tui",
        "--currency",
        "INR",
        "--compact",
        "--refresh-secs",
        "5",
        "--per-page",
        "1000",
        "--api-base",
        "http://localhost:8080/api/v3",
    ])
    .unwrap();

    let mut config = AppConfig::default();
    config.apply_args(&args);
    assert_eq!(config.currency, Currency::Inr);
    assert_eq!(config.density, Density::Compact);
    assert_eq!(config.api_base, "http://localhost:8080/api/v3");
    // Clamped on use, not on parse
    assert_eq!(config.refresh_interval(), Duration::from_secs(MIN_REFRESH_SECS));
    assert_eq!(config.per_page(), MAX_PER_PAGE);
}

#[test]
fn test_args_defaults_leave_config_alone() {
    let args = Args::try_parse_from(["coin-tui"]).unwrap();
    assert!(!args.once);
    assert_eq!(args.limit, 20);

    let mut config = AppConfig::default();
    config.apply_args(&args);
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.refresh_interval(), Duration::from_secs(60));
}

#[test]
fn test_unknown_currency_is_rejected() {
    assert!(Args::try_parse_from(["coin-tui", "--currency", "eur"]).is_err());
}

#[test]
fn test_save_preferences_keeps_flags_and_env_key_out_of_file() {
    let path = temp_config_path("preferences");
    let stored = AppConfig {
        refresh_secs: 90,
        ..Default::default()
    };
    stored.save_to(&path).unwrap();

    // What a run looks like after flags and COINGECKO_API_KEY are layered on
    let args = Args::try_parse_from([
        "coin-tui",
        "--per-page",
        "5",
        "--refresh-secs",
        "11",
        "--api-base",
        "http://127.0.0.1:9",
    ])
    .unwrap();
    let mut running = AppConfig::load_from(&path).unwrap();
    running.apply_args(&args);
    running.api_key = Some("SECRET-FROM-ENV".to_string());
    assert_eq!(running.per_page, 5);
    assert_eq!(running.refresh_secs, 11);

    AppConfig::save_preferences(&path, Currency::Inr, Density::Compact).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(!content.contains("SECRET-FROM-ENV"));
    assert!(!content.contains("127.0.0.1:9"));

    let loaded = AppConfig::load_from(&path).unwrap();
    assert_eq!(loaded.currency, Currency::Inr);
    assert_eq!(loaded.density, Density::Compact);
    assert_eq!(loaded.refresh_secs, 90);
    assert_eq!(loaded.per_page, stored.per_page);
    assert_eq!(loaded.api_base, COINGECKO_API_BASE);
    assert_eq!(loaded.api_key, None);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_save_preferences_creates_missing_file() {
    let path = temp_config_path("preferences-new");
    AppConfig::save_preferences(&path, Currency::Inr, Density::Comfortable).unwrap();

    let loaded = AppConfig::load_from(&path).unwrap();
    assert_eq!(loaded.currency, Currency::Inr);
    assert_eq!(loaded.refresh_secs, DEFAULT_REFRESH_SECS);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
