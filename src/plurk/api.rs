//! Core Plurk API utilities.
//!
//! This module contains the HTTP transport used for every Plurk call: a single
//! GET with caller-supplied headers whose body is parsed as JSON.

use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::error::PlurkError;

/// Sanitizes text for safe logging by truncating and escaping control characters.
///
/// # Parameters
///
/// - `text`: The text to sanitize
/// - `max_len`: Maximum length in characters before truncation
///
/// # Returns
///
/// A single-line string safe for logging
pub(crate) fn sanitize_for_logging(text: &str, max_len: usize) -> String {
    let sanitized: String = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect();

    if sanitized.chars().count() > max_len {
        let truncated: String = sanitized.chars().take(max_len).collect();
        format!(
            "{}... [truncated, {} total bytes]",
            truncated,
            text.len()
        )
    } else {
        sanitized
    }
}

/// Something that can perform an authenticated GET against Plurk.
///
/// Implementations issue exactly one request per call and never retry.
#[async_trait]
pub trait PlurkTransport: Send + Sync {
    /// Sends a GET to `url` with `headers` and returns the parsed JSON body.
    async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<Value, PlurkError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct PlurkHttpClient {
    client: Client,
}

impl PlurkHttpClient {
    /// Builds a client. With `timeout` set to `None` a hung request waits
    /// indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self, PlurkError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl PlurkTransport for PlurkHttpClient {
    async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<Value, PlurkError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        // The query string carries signed parameters; log only the path.
        let endpoint = url.split('?').next().unwrap_or(url);
        info!("Sending GET request to {}", endpoint);

        let response = request.send().await.map_err(|e| {
            error!("Request to {} failed: {}", endpoint, e);
            PlurkError::from(e)
        })?;
        let status = response.status();
        let body = response.text().await?;
        debug!(
            "Received {} from {} ({} bytes)",
            status,
            endpoint,
            body.len()
        );

        let json: Value = serde_json::from_str(&body).map_err(|e| {
            error!("Unparsable {} response from {}", status, endpoint);
            debug!("Body from {}: {}", endpoint, sanitize_for_logging(&body, 200));
            PlurkError::Parse(e)
        })?;

        if !status.is_success() {
            let message = json
                .get("error_text")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| sanitize_for_logging(&json.to_string(), 200));
            error!("Plurk returned {} for {}: {}", status, endpoint, message);
            return Err(PlurkError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(json)
    }
}
