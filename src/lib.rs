//! # Replurker Library
//!
//! A Rust web service library that periodically searches Plurk for a fixed
//! query and replurks the matching posts. Every Plurk call is signed with
//! OAuth 1.0a (HMAC-SHA1).
//!
//! ## Features
//!
//! - OAuth 1.0a request signing
//! - Hourly search/replurk job
//! - Manual trigger endpoint
//! - Structured logging
//! - Health check endpoint
//!
//! ## Configuration
//!
//! - `CONSUMER_KEY`, `CONSUMER_SECRET`: Plurk app credentials
//! - `OAUTH_TOKEN`, `OAUTH_TOKEN_SECRET`: Plurk access token of the bot account
//! - `PLURK_SEARCH_QUERY`: text to search for
//! - `PLURK_REQUEST_TIMEOUT_SECS`: optional timeout for outbound requests
//! - `REPLURK_CRON`: schedule of the periodic job (defaults to hourly)
//! - `PORT`: Server port (defaults to 3000)
//!
//! ## API Endpoints
//!
//! - `GET /`: Returns a welcome message
//! - `GET /health`: Returns service health status
//! - `GET /run-cron`: Runs the search/replurk job immediately

pub mod config;
pub mod cronjob;
pub mod error;
pub mod handlers;
pub mod oauth;
pub mod plurk;

// Re-export commonly used types and functions
pub use config::{get_server_port, PlurkConfig};
pub use cronjob::{run_replurk_cycle, start_replurk_cronjob, CycleReport};
pub use error::PlurkError;
pub use handlers::{handle_health, handle_root, handle_run_cron};
pub use oauth::{Credentials, OAuthParams, OAuthSigner};
pub use plurk::{replurk, search_plurks, PlurkId, ReplurkContext, ReplurkOutcome};
