use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_positive_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        match parse_u64(var, default)? {
            0 => Err(invalid(var, "must be greater than zero".to_string())),
            n => Ok(n),
        }
    };

    let env = parse_environment(&or_default("LUNCH_ENV", "development"))?;

    let bind_addr = or_default("LUNCH_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("LUNCH_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("LUNCH_LOG_LEVEL", "info");
    let sources_path = PathBuf::from(or_default("LUNCH_SOURCES_PATH", "./config/sources.yaml"));

    let cache_ttl_minutes = parse_positive_u64("LUNCH_CACHE_TTL_MINUTES", "240")?;
    let refresh_cron = or_default("LUNCH_REFRESH_CRON", "0 0 */2 * * *");
    let cron_fields = refresh_cron.split_whitespace().count();
    if !(6..=7).contains(&cron_fields) {
        return Err(invalid(
            "LUNCH_REFRESH_CRON",
            format!("expected 6 or 7 cron fields, got {cron_fields}"),
        ));
    }
    let initial_refresh_delay_secs = parse_u64("LUNCH_INITIAL_REFRESH_DELAY_SECS", "1")?;

    let scraper_request_timeout_secs =
        parse_positive_u64("LUNCH_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    let scraper_pdf_timeout_secs = parse_positive_u64("LUNCH_SCRAPER_PDF_TIMEOUT_SECS", "10")?;
    let scraper_user_agent = or_default(
        "LUNCH_SCRAPER_USER_AGENT",
        "Mozilla/5.0 (compatible; LunchMenuBot/1.0)",
    );

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        sources_path,
        cache_ttl_minutes,
        refresh_cron,
        initial_refresh_delay_secs,
        scraper_request_timeout_secs,
        scraper_pdf_timeout_secs,
        scraper_user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LUNCH_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
