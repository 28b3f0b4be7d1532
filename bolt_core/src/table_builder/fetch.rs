//! One-shot blocking page fetch.

use tracing::info;

use crate::errors::{BoltError, BoltResult};

const USER_AGENT: &str = concat!("bolt_core/", env!("CARGO_PKG_VERSION"));

/// GET `url` and return the body text. Non-2xx status is an error.
pub fn fetch_page(url: &str) -> BoltResult<String> {
    info!(url, "Fetching thread table page");

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| BoltError::fetch_error(url, e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| BoltError::fetch_error(url, e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(BoltError::fetch_error(url, format!("HTTP status {}", status)));
    }

    response
        .text()
        .map_err(|e| BoltError::fetch_error(url, format!("failed to read body: {}", e)))
}
