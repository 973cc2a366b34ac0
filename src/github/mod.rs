//! GitHub API collaborators: repository discovery, file-content fetch, and
//! the rate-limit signal.
//!
//! Every function here degrades gracefully: a missing file is `Ok(None)`,
//! a rate-limited scan returns whatever was collected so far. The core
//! pipeline never sees a live API handle, only the snapshots built here.

use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Client;

pub mod contents;
pub mod rate_limit;
pub mod search;

const API_ROOT: &str = "https://api.github.com";

/// Build the shared HTTP client. The token is optional; unauthenticated
/// requests work against the public API but with a much smaller quota.
pub fn client(token: Option<&str>) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("stacklens/0.1.0"));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/vnd.github+json"),
    );
    if let Some(token) = token {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
    }

    let client = Client::builder()
        .default_headers(headers)
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    Ok(client)
}
