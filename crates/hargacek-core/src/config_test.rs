use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "HARGACEK_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.sites_path.is_none());
    assert!(cfg.chrome_executable.is_none());
    assert!(cfg.headless);
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.wait_for_content_secs, 10);
    assert_eq!(cfg.site_budget_secs, 15);
    assert_eq!(cfg.global_deadline_secs, 18);
    assert_eq!(cfg.http_timeout_secs, 10);
    assert!(cfg.serpapi_api_key.is_none());
    assert_eq!(cfg.serpapi_engine, "google_shopping");
    assert_eq!(cfg.rate_limit_per_minute, 30);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("HARGACEK_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "HARGACEK_BIND_ADDR"),
        "expected InvalidEnvVar(HARGACEK_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_on_invalid_env_name() {
    let mut map = HashMap::new();
    map.insert("HARGACEK_ENV", "producton");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "HARGACEK_ENV"),
        "expected InvalidEnvVar(HARGACEK_ENV), got: {result:?}"
    );
}

#[test]
fn serpapi_key_is_read_when_present() {
    let mut map = HashMap::new();
    map.insert("SERPAPI_API_KEY", "secret-key");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.serpapi_api_key.as_deref(), Some("secret-key"));
}

#[test]
fn blank_serpapi_key_counts_as_unset() {
    let mut map = HashMap::new();
    map.insert("SERPAPI_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.serpapi_api_key.is_none());
}

#[test]
fn debug_output_redacts_serpapi_key() {
    let mut map = HashMap::new();
    map.insert("SERPAPI_API_KEY", "secret-key");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("secret-key"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn headless_accepts_false() {
    let mut map = HashMap::new();
    map.insert("HARGACEK_HEADLESS", "false");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(!cfg.headless);
}

#[test]
fn headless_rejects_garbage() {
    let mut map = HashMap::new();
    map.insert("HARGACEK_HEADLESS", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "HARGACEK_HEADLESS"),
        "expected InvalidEnvVar(HARGACEK_HEADLESS), got: {result:?}"
    );
}

#[test]
fn site_budget_override() {
    let mut map = HashMap::new();
    map.insert("HARGACEK_SITE_BUDGET_SECS", "12");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.site_budget().as_secs(), 12);
}

#[test]
fn site_budget_invalid() {
    let mut map = HashMap::new();
    map.insert("HARGACEK_SITE_BUDGET_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "HARGACEK_SITE_BUDGET_SECS"),
        "expected InvalidEnvVar(HARGACEK_SITE_BUDGET_SECS), got: {result:?}"
    );
}

#[test]
fn global_deadline_shorter_than_wait_for_content_fails() {
    let mut map = HashMap::new();
    map.insert("HARGACEK_WAIT_FOR_CONTENT_SECS", "10");
    map.insert("HARGACEK_GLOBAL_DEADLINE_SECS", "5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "HARGACEK_GLOBAL_DEADLINE_SECS"),
        "expected InvalidEnvVar(HARGACEK_GLOBAL_DEADLINE_SECS), got: {result:?}"
    );
}

#[test]
fn zero_wait_for_content_fails() {
    let mut map = HashMap::new();
    map.insert("HARGACEK_WAIT_FOR_CONTENT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "HARGACEK_WAIT_FOR_CONTENT_SECS"),
        "expected InvalidEnvVar(HARGACEK_WAIT_FOR_CONTENT_SECS), got: {result:?}"
    );
}

#[test]
fn rate_limit_override() {
    let mut map = HashMap::new();
    map.insert("HARGACEK_RATE_LIMIT_PER_MINUTE", "120");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.rate_limit_per_minute, 120);
}

#[test]
fn sites_path_is_read_when_present() {
    let mut map = HashMap::new();
    map.insert("HARGACEK_SITES_PATH", "./config/sites.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.sites_path.as_deref(),
        Some(std::path::Path::new("./config/sites.yaml"))
    );
}
