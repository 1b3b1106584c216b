//! # Seeking Alpha crawler
//!
//! Scrapes article titles from the public search page. Headlines only;
//! article bodies sit behind a paywall and are left alone.

use anyhow::Result;
use concat_string::concat_string;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::util;

pub const HOST: &str = "seekingalpha.com";

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a[data-test-id='post-list-item-title']")
        .expect("Failed to parse title selector")
});

/// Fetches article titles matching the query from the search page.
pub async fn search_titles(query: &str, limit: usize) -> Result<Vec<String>> {
    let url = concat_string!(
        "https://",
        HOST,
        "/search?q=",
        urlencoding::encode(query)
    );

    util::http::throttle().await;
    let body = util::http::get(&url, None).await?;

    Ok(extract_titles(&body, limit))
}

fn extract_titles(body: &str, limit: usize) -> Vec<String> {
    let document = Html::parse_document(body);

    document
        .select(&TITLE_SELECTOR)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
        .take(limit)
        .collect()
}
