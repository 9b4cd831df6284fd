//! Plurk API integration module.
//!
//! This module contains the OAuth 1.0a signed calls the bot makes against
//! Plurk: searching for plurks and replurking them.

mod api;
mod parsing;
mod replurk;
mod search;

use std::sync::Arc;

use crate::config::PlurkConfig;
use crate::error::PlurkError;

// Re-export public API
pub use api::{PlurkHttpClient, PlurkTransport};
pub use parsing::{encode_ids, extract_plurk_ids, summarize_replurk_response, PlurkId};
pub use replurk::{replurk, ReplurkOutcome};
pub use search::search_plurks;

/// Everything a search/replurk run needs, shared by the scheduler and the
/// HTTP handlers.
///
/// Both fields are read-only after startup; cloning is cheap.
#[derive(Clone)]
pub struct ReplurkContext {
    pub config: Arc<PlurkConfig>,
    pub transport: Arc<dyn PlurkTransport>,
}

impl ReplurkContext {
    pub fn new(config: PlurkConfig, transport: Arc<dyn PlurkTransport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    /// Builds a context that talks to Plurk over HTTP.
    pub fn from_config(config: PlurkConfig) -> Result<Self, PlurkError> {
        let client = PlurkHttpClient::new(config.request_timeout)?;
        Ok(Self::new(config, Arc::new(client)))
    }
}
