use crate::app_config::AppConfig;
use crate::ConfigError;

/// The YouTube API allows at most 50 search results per request.
const MAX_RESULTS_PER_KEYWORD: usize = 50;
/// The YouTube API allows at most 100 comment threads per request.
const MAX_COMMENTS_PER_VIDEO: usize = 100;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if env var values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if env var values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_weight = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if value < 0.0 || !value.is_finite() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("weight must be a non-negative finite number, got {raw}"),
            });
        }
        Ok(value)
    };

    let log_level = or_default("SOVSCAN_LOG_LEVEL", "info");
    let brands_path = PathBuf::from(or_default("SOVSCAN_BRANDS_PATH", "./config/brands.yaml"));
    let reports_dir = PathBuf::from(or_default("SOVSCAN_REPORTS_DIR", "./reports"));
    let youtube_api_key = lookup("YOUTUBE_API_KEY").ok();

    let results_per_keyword =
        parse_usize("SOVSCAN_RESULTS_PER_KEYWORD", "15")?.min(MAX_RESULTS_PER_KEYWORD);
    let comments_per_video =
        parse_usize("SOVSCAN_COMMENTS_PER_VIDEO", "50")?.min(MAX_COMMENTS_PER_VIDEO);

    let request_timeout_secs = parse_u64("SOVSCAN_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SOVSCAN_USER_AGENT", "sovscan/0.1 (share-of-voice)");
    let inter_request_delay_ms = parse_u64("SOVSCAN_INTER_REQUEST_DELAY_MS", "250")?;

    let weight_basic = parse_weight("SOV_WEIGHT_BASIC", "0.40")?;
    let weight_engagement = parse_weight("SOV_WEIGHT_ENGAGEMENT", "0.30")?;
    let weight_sentiment = parse_weight("SOV_WEIGHT_SENTIMENT", "0.20")?;
    let weight_visibility = parse_weight("SOV_WEIGHT_VISIBILITY", "0.10")?;

    Ok(AppConfig {
        log_level,
        brands_path,
        reports_dir,
        youtube_api_key,
        results_per_keyword,
        comments_per_video,
        request_timeout_secs,
        user_agent,
        inter_request_delay_ms,
        weight_basic,
        weight_engagement,
        weight_sentiment,
        weight_visibility,
    })
}
