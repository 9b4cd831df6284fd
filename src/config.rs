//! Configuration module for the replurker service.
//!
//! This module contains the configuration structure and environment variable
//! handling for the Plurk API integration. Configuration is read once at
//! startup and shared read-only afterwards.

use log::{info, warn};
use std::env;
use std::time::Duration;

use crate::oauth::Credentials;

/// Plurk search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://www.plurk.com/APP/PlurkSearch/search";
/// Plurk replurk endpoint.
pub const DEFAULT_REPLURK_URL: &str = "https://www.plurk.com/APP/Timeline/replurk";
/// Search text used when `PLURK_SEARCH_QUERY` is not set.
pub const DEFAULT_SEARCH_QUERY: &str = "Your Search Query Here";
/// Top of every hour (seconds, minutes, hours, day of month, month, day of week).
pub const DEFAULT_CRON_SCHEDULE: &str = "0 0 * * * *";
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration for the Plurk API integration.
///
/// Holds the OAuth 1.0a credentials, the endpoints to call and the scheduling
/// settings. `Debug` output never includes the secrets.
#[derive(Debug, Clone)]
pub struct PlurkConfig {
    /// OAuth 1.0a consumer and access credentials
    pub credentials: Credentials,
    /// The text searched for on every run
    pub search_query: String,
    /// Full URL of the search endpoint, without query string
    pub search_url: String,
    /// Full URL of the replurk endpoint, without query string
    pub replurk_url: String,
    /// Timeout for each outbound request; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// Cron expression for the scheduled run
    pub cron_schedule: String,
}

impl Default for PlurkConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            search_query: DEFAULT_SEARCH_QUERY.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            replurk_url: DEFAULT_REPLURK_URL.to_string(),
            request_timeout: None,
            cron_schedule: DEFAULT_CRON_SCHEDULE.to_string(),
        }
    }
}

impl PlurkConfig {
    /// Loads the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CONSUMER_KEY`, `CONSUMER_SECRET`: the Plurk app credentials
    /// - `OAUTH_TOKEN`, `OAUTH_TOKEN_SECRET`: the bot account's access token
    /// - `PLURK_SEARCH_QUERY`: text to search for
    /// - `PLURK_SEARCH_URL`, `PLURK_REPLURK_URL`: endpoint overrides
    /// - `PLURK_REQUEST_TIMEOUT_SECS`: per-request timeout in seconds
    /// - `REPLURK_CRON`: schedule for the periodic run
    ///
    /// Missing credentials are not an error here. They are logged and left
    /// empty, so the failure shows up when Plurk rejects the signed request.
    pub fn from_env() -> Self {
        let credentials = Credentials {
            consumer_key: credential_var("CONSUMER_KEY"),
            consumer_secret: credential_var("CONSUMER_SECRET"),
            token: credential_var("OAUTH_TOKEN"),
            token_secret: credential_var("OAUTH_TOKEN_SECRET"),
        };

        let request_timeout = match env::var("PLURK_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout(&raw),
            Err(_) => None,
        };

        let config = Self {
            credentials,
            search_query: env_or("PLURK_SEARCH_QUERY", DEFAULT_SEARCH_QUERY),
            search_url: env_or("PLURK_SEARCH_URL", DEFAULT_SEARCH_URL),
            replurk_url: env_or("PLURK_REPLURK_URL", DEFAULT_REPLURK_URL),
            request_timeout,
            cron_schedule: env_or("REPLURK_CRON", DEFAULT_CRON_SCHEDULE),
        };

        info!(
            "Loaded Plurk configuration: query='{}', schedule='{}', timeout={:?}",
            config.search_query, config.cron_schedule, config.request_timeout
        );
        config
    }
}

/// Reads a credential, warning (without the value) when it is missing.
fn credential_var(name: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => {
            warn!(
                "{} is not set - signed requests will be rejected by Plurk",
                name
            );
            String::new()
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parses a timeout in whole seconds. Zero or garbage disables the timeout.
fn parse_timeout(raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(e) => {
            warn!(
                "Ignoring invalid PLURK_REQUEST_TIMEOUT_SECS '{}': {}",
                raw, e
            );
            None
        }
    }
}

/// Gets the server port from the `PORT` environment variable.
///
/// # Returns
///
/// The port to bind to, defaulting to 3000 when `PORT` is unset or not a
/// valid port number.
pub fn get_server_port() -> u16 {
    match env::var("PORT") {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!(
                "Invalid PORT '{}' ({}), falling back to {}",
                raw, e, DEFAULT_PORT
            );
            DEFAULT_PORT
        }),
        Err(_) => DEFAULT_PORT,
    }
}
