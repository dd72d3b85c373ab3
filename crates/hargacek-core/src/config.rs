use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub(crate) const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files, which is useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup, with no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty strings count as unset so `.env` templates can leave keys blank.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        match or_default(var, default).to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            other => Err(invalid(var, format!("expected a boolean, got '{other}'"))),
        }
    };

    let env = parse_environment(&or_default("HARGACEK_ENV", "development"))?;

    let bind_addr = parse_addr("HARGACEK_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("HARGACEK_LOG_LEVEL", "info");
    let sites_path = optional("HARGACEK_SITES_PATH").map(PathBuf::from);
    let chrome_executable = optional("HARGACEK_CHROME_EXECUTABLE").map(PathBuf::from);
    let headless = parse_bool("HARGACEK_HEADLESS", "true")?;
    let user_agent = or_default("HARGACEK_USER_AGENT", DEFAULT_USER_AGENT);

    let wait_for_content_secs = parse_u64("HARGACEK_WAIT_FOR_CONTENT_SECS", "10")?;
    let site_budget_secs = parse_u64("HARGACEK_SITE_BUDGET_SECS", "15")?;
    let global_deadline_secs = parse_u64("HARGACEK_GLOBAL_DEADLINE_SECS", "18")?;
    let http_timeout_secs = parse_u64("HARGACEK_HTTP_TIMEOUT_SECS", "10")?;

    if wait_for_content_secs == 0 {
        return Err(invalid(
            "HARGACEK_WAIT_FOR_CONTENT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    if global_deadline_secs < wait_for_content_secs {
        return Err(invalid(
            "HARGACEK_GLOBAL_DEADLINE_SECS",
            format!(
                "global deadline ({global_deadline_secs}s) must not be shorter than the \
                 wait-for-content timeout ({wait_for_content_secs}s)"
            ),
        ));
    }

    let serpapi_api_key = optional("SERPAPI_API_KEY");
    let serpapi_engine = or_default("HARGACEK_SERPAPI_ENGINE", "google_shopping");
    let rate_limit_per_minute = parse_usize("HARGACEK_RATE_LIMIT_PER_MINUTE", "30")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        sites_path,
        chrome_executable,
        headless,
        user_agent,
        wait_for_content_secs,
        site_budget_secs,
        global_deadline_secs,
        http_timeout_secs,
        serpapi_api_key,
        serpapi_engine,
        rate_limit_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "HARGACEK_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
