use std::collections::HashSet;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use reqwest::StatusCode;
use serde::Deserialize;

use super::API_ROOT;
use crate::models::RepoMeta;

/// One page of `/search/repositories` results.
#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    full_name: String,
    stargazers_count: u64,
}

// The search API serves at most 1000 results per query.
const PER_PAGE: usize = 100;
const MAX_PAGES: usize = 10;

/// Sequentially scan the search API for popular Python repositories,
/// most-starred first, until `max_repos` are collected or the rate limit
/// cuts the scan short. Rate-limit exhaustion is not an error: whatever
/// has been collected so far is returned.
pub async fn scrape(
    client: &reqwest::Client,
    max_repos: usize,
    min_stars: u64,
    delay: Duration,
    quiet: bool,
) -> Result<Vec<RepoMeta>> {
    let query = format!("language:Python stars:>={}", min_stars);
    let mut repos: Vec<RepoMeta> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    if !quiet {
        eprintln!("{} Gathering repository data from GitHub...", "→".cyan());
    }

    for page in 1..=MAX_PAGES {
        if repos.len() >= max_repos {
            break;
        }

        let per_page = PER_PAGE.to_string();
        let page_num = page.to_string();
        let response = client
            .get(format!("{}/search/repositories", API_ROOT))
            .query(&[
                ("q", query.as_str()),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", per_page.as_str()),
                ("page", page_num.as_str()),
            ])
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                eprintln!("{} search request failed: {}", "!".yellow(), e);
                break;
            }
        };

        if response.status() == StatusCode::FORBIDDEN
            || response.status() == StatusCode::TOO_MANY_REQUESTS
        {
            if !quiet {
                eprintln!(
                    "{} Rate limit reached. Returning {} collected repositories.",
                    "!".yellow(),
                    repos.len()
                );
            }
            break;
        }

        if !response.status().is_success() {
            eprintln!(
                "{} search returned HTTP {}; stopping scan",
                "!".yellow(),
                response.status()
            );
            break;
        }

        let search_page: SearchPage = response.json().await?;
        if search_page.items.is_empty() {
            break;
        }

        for item in search_page.items {
            if repos.len() >= max_repos {
                break;
            }
            if seen.insert(item.full_name.clone()) {
                repos.push(RepoMeta {
                    full_name: item.full_name,
                    stars: item.stargazers_count,
                });
            }
        }

        // Courtesy pacing between pages
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    if !quiet {
        eprintln!("{} Collected {} repositories.", "✓".green(), repos.len());
    }

    Ok(repos)
}
