use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Identity sent with every page fetch: a generic desktop browser.
pub const DEFAULT_SCRAPER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Per-request fetch timeout.
pub const DEFAULT_SCRAPER_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_nonzero_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let value = or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be at least 1".to_string()));
        }
        Ok(value)
    };

    let database_url = require("DATABASE_URL")?;

    let env = parse_environment(&or_default("RIVALWATCH_ENV", "development"))?;

    let log_level = or_default("RIVALWATCH_LOG_LEVEL", "info");
    let competitors_path = PathBuf::from(or_default(
        "RIVALWATCH_COMPETITORS_PATH",
        "./config/competitors.yaml",
    ));
    let model_path = PathBuf::from(or_default(
        "RIVALWATCH_MODEL_PATH",
        "./models/text_classifier.json",
    ));

    let db_max_connections = parse_u32("RIVALWATCH_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("RIVALWATCH_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("RIVALWATCH_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let scraper_request_timeout_secs = parse_u64(
        "RIVALWATCH_SCRAPER_REQUEST_TIMEOUT_SECS",
        &DEFAULT_SCRAPER_REQUEST_TIMEOUT_SECS.to_string(),
    )?;
    if scraper_request_timeout_secs == 0 {
        return Err(invalid(
            "RIVALWATCH_SCRAPER_REQUEST_TIMEOUT_SECS",
            "must be at least 1".to_string(),
        ));
    }
    let scraper_user_agent = or_default("RIVALWATCH_SCRAPER_USER_AGENT", DEFAULT_SCRAPER_USER_AGENT);
    let max_concurrent_fetches = parse_nonzero_usize("RIVALWATCH_MAX_CONCURRENT_FETCHES", "8")?;

    let scan_interval_secs = parse_u64("RIVALWATCH_SCAN_INTERVAL_SECS", "3600")?;
    if scan_interval_secs == 0 {
        return Err(invalid(
            "RIVALWATCH_SCAN_INTERVAL_SECS",
            "must be at least 1".to_string(),
        ));
    }

    Ok(AppConfig {
        database_url,
        env,
        log_level,
        competitors_path,
        model_path,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        scraper_request_timeout_secs,
        scraper_user_agent,
        max_concurrent_fetches,
        scan_interval_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "RIVALWATCH_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
