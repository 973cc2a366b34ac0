use anyhow::Result;
use reqwest::Client;

use super::API_ROOT;

/// Fetch one file from a repository's default branch.
///
/// Returns `Ok(Some(text))` on success and `Ok(None)` when the file does
/// not exist (or the API refuses the request). The raw-content media type
/// spares us the base64 envelope of the default contents response.
pub async fn fetch(client: &Client, repo: &str, path: &str) -> Result<Option<String>> {
    let url = format!("{}/repos/{}/contents/{}", API_ROOT, repo, path);

    let response = client
        .get(&url)
        .header("Accept", "application/vnd.github.raw+json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Ok(None);
    }

    let text = response.text().await?;
    Ok(Some(text))
}
