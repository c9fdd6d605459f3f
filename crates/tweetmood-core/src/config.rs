use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

use crate::app_config::{AppConfig, Environment, NluCredentials, TwitterCredentials};

const DEFAULT_SEARCH_TERMS: &str = "PSU,Penn State,Penn State University";
const DEFAULT_TWITTER_BASE_URL: &str = "https://api.twitter.com/";
const DEFAULT_NLU_VERSION: &str = "2022-04-07";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

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
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

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

    let twitter = TwitterCredentials {
        consumer_key: require("TWITTER_CONSUMER_KEY")?,
        consumer_secret: require("TWITTER_CONSUMER_SECRET")?,
        base_url: or_default("TWITTER_API_BASE_URL", DEFAULT_TWITTER_BASE_URL),
    };
    let nlu = NluCredentials {
        api_key: require("NLU_API_KEY")?,
        url: require("NLU_URL")?,
        version: or_default("NLU_VERSION", DEFAULT_NLU_VERSION),
    };

    let env = parse_environment(&or_default("TWEETMOOD_ENV", "development"));
    let bind_addr = parse_bind_addr(&lookup)?;
    let log_level = or_default("TWEETMOOD_LOG_LEVEL", "info");
    let static_dir = PathBuf::from(or_default("TWEETMOOD_STATIC_DIR", "./client/static"));
    let js_dir = PathBuf::from(or_default("TWEETMOOD_JS_DIR", "./client/js"));

    let search_terms = parse_search_terms(&or_default(
        "TWEETMOOD_SEARCH_TERMS",
        DEFAULT_SEARCH_TERMS,
    ));
    if search_terms.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "TWEETMOOD_SEARCH_TERMS".to_string(),
            reason: "at least one search term is required".to_string(),
        });
    }

    let tweet_count = parse_u64("TWEETMOOD_TWEET_COUNT", "200")?;
    if tweet_count == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TWEETMOOD_TWEET_COUNT".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let tweet_count = usize::try_from(tweet_count).map_err(|e| ConfigError::InvalidEnvVar {
        var: "TWEETMOOD_TWEET_COUNT".to_string(),
        reason: e.to_string(),
    })?;

    let search_lang = or_default("TWEETMOOD_SEARCH_LANG", "en");
    let request_timeout_secs = parse_u64("TWEETMOOD_REQUEST_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        static_dir,
        js_dir,
        twitter,
        nlu,
        search_terms,
        tweet_count,
        search_lang,
        request_timeout_secs,
    })
}

/// Resolve the listen address from `TWEETMOOD_BIND_HOST` and the port.
///
/// The port comes from `PORT`, then `VCAP_APP_PORT`, then `8080`. Blank values are skipped.
fn parse_bind_addr<F>(lookup: &F) -> Result<SocketAddr, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let host_raw = lookup("TWEETMOOD_BIND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let host = host_raw
        .parse::<IpAddr>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "TWEETMOOD_BIND_HOST".to_string(),
            reason: e.to_string(),
        })?;

    let (port_var, port_raw) = ["PORT", "VCAP_APP_PORT"]
        .into_iter()
        .find_map(|var| {
            lookup(var)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| (var, v))
        })
        .unwrap_or(("PORT", "8080".to_string()));
    let port = port_raw
        .parse::<u16>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: port_var.to_string(),
            reason: e.to_string(),
        })?;

    Ok(SocketAddr::new(host, port))
}

/// Split a comma-separated term list, dropping blanks.
fn parse_search_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
