//! Replurking of search results.

use log::{error, info};
use serde_json::Value;

use crate::error::PlurkError;
use crate::oauth::{authorization_header, query_string, OAuthParams, OAuthSigner};

use super::api::sanitize_for_logging;
use super::parsing::{encode_ids, summarize_replurk_response, PlurkId};
use super::ReplurkContext;

/// What happened to a replurk request.
#[derive(Debug)]
pub enum ReplurkOutcome {
    /// No ids were given, so nothing was sent.
    Skipped,
    /// Plurk answered; the parsed response body.
    Completed(Value),
    /// The request failed; the error is already logged.
    Failed(PlurkError),
}

impl ReplurkOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ReplurkOutcome::Completed(_))
    }
}

/// Replurks every plurk in `ids` with a single request.
///
/// An empty list returns [`ReplurkOutcome::Skipped`] without touching the
/// network. Failures are logged and not retried.
pub async fn replurk(ctx: &ReplurkContext, ids: &[PlurkId]) -> ReplurkOutcome {
    if ids.is_empty() {
        return ReplurkOutcome::Skipped;
    }

    info!("Replurking {} plurks", ids.len());

    match send_replurk(ctx, ids).await {
        Ok(response) => {
            info!(
                "Replurk response: {} ({})",
                summarize_replurk_response(&response),
                sanitize_for_logging(&response.to_string(), 500)
            );
            ReplurkOutcome::Completed(response)
        }
        Err(e) => {
            error!("Error replurking: {}", e);
            ReplurkOutcome::Failed(e)
        }
    }
}

async fn send_replurk(ctx: &ReplurkContext, ids: &[PlurkId]) -> Result<Value, PlurkError> {
    let config = &ctx.config;

    let mut params = OAuthParams::new(&config.credentials);
    params.insert("ids", encode_ids(ids));
    let signed = OAuthSigner::new(&config.credentials)
        .sign_request("GET", &config.replurk_url, params)?;

    // Every parameter, OAuth fields included, goes into the query string.
    let url = format!("{}?{}", config.replurk_url, query_string(signed.iter()));
    let headers = [("Authorization".to_string(), authorization_header(&signed))];

    ctx.transport.get(&url, &headers).await
}
