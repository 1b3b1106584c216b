//! # Hacker News crawler
//!
//! Uses the Algolia search API. Only story titles are kept; comment trees
//! are left alone.

use anyhow::Result;
use serde::Deserialize;

use crate::util;

pub const HOST: &str = "hn.algolia.com";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(default)]
    title: Option<String>,
}

/// Searches Hacker News stories and returns their titles.
pub async fn search_titles(query: &str, limit: usize) -> Result<Vec<String>> {
    let url = format!(
        "https://{host}/api/v1/search?query={query}&tags=story&hitsPerPage={limit}",
        host = HOST,
        query = urlencoding::encode(query),
        limit = limit
    );

    let response: SearchResponse = util::http::get_json(&url).await?;

    Ok(response
        .hits
        .into_iter()
        .filter_map(|hit| hit.title)
        .filter(|title| !title.trim().is_empty())
        .take(limit)
        .collect())
}
