use anyhow::Result;
use reqwest::Client;

use super::API_ROOT;

/// Remaining core-API quota for the authenticated user. A refused request
/// is reported as zero remaining rather than an error.
pub async fn remaining(client: &Client) -> Result<u64> {
    let response = client
        .get(format!("{}/rate_limit", API_ROOT))
        .send()
        .await?;

    if !response.status().is_success() {
        return Ok(0);
    }

    let data: serde_json::Value = response.json().await?;
    let remaining = data
        .get("resources")
        .and_then(|r| r.get("core"))
        .and_then(|c| c.get("remaining"))
        .and_then(|v| v.as_u64())
        .unwrap_or(0);

    Ok(remaining)
}
