//! Plurk search.
//!
//! Runs the configured query against the PlurkSearch endpoint and returns the
//! ids of the matching plurks.

use log::{error, info};

use crate::error::PlurkError;
use crate::oauth::{authorization_header, query_string, OAuthParams, OAuthSigner};

use super::parsing::{extract_plurk_ids, PlurkId};
use super::ReplurkContext;

/// Searches Plurk for the configured query.
///
/// Only the first page (`offset=0`) is requested.
///
/// # Returns
///
/// The ids of the matching plurks in response order. Transport and parse
/// failures are logged and reported as an empty list, the same as a search
/// with no hits.
pub async fn search_plurks(ctx: &ReplurkContext) -> Vec<PlurkId> {
    info!("Searching for plurks matching '{}'", ctx.config.search_query);

    match fetch_search_results(ctx).await {
        Ok(ids) if ids.is_empty() => {
            info!("No new plurks found");
            ids
        }
        Ok(ids) => {
            info!("Found {} plurks: {:?}", ids.len(), ids);
            ids
        }
        Err(e) => {
            error!("Error fetching plurks: {}", e);
            Vec::new()
        }
    }
}

async fn fetch_search_results(ctx: &ReplurkContext) -> Result<Vec<PlurkId>, PlurkError> {
    let config = &ctx.config;
    let query = config.search_query.as_str();

    let mut params = OAuthParams::new(&config.credentials);
    params.insert("query", query);
    params.insert("offset", 0);
    let signed = OAuthSigner::new(&config.credentials)
        .sign_request("GET", &config.search_url, params)?;

    let url = format!(
        "{}?{}",
        config.search_url,
        query_string([("query", query), ("offset", "0")])
    );
    let headers = [("Authorization".to_string(), authorization_header(&signed))];

    let response = ctx.transport.get(&url, &headers).await?;
    Ok(extract_plurk_ids(&response))
}
