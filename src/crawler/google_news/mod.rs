//! # Google News crawler
//!
//! Pulls the RSS search feed for a company name. Headlines and snippets
//! feed the sentiment scorer.

use anyhow::Result;

use crate::util::{
    self,
    feed::{self, RssItem},
};

pub const HOST: &str = "news.google.com";

/// Fetches recent news items mentioning the company.
pub async fn fetch_news(company_name: &str, limit: usize) -> Result<Vec<RssItem>> {
    let url = format!(
        "https://{host}/rss/search?q={query}&hl=en-IN&gl=IN&ceid=IN:en",
        host = HOST,
        query = urlencoding::encode(company_name)
    );

    let xml = util::http::get(&url, None).await?;
    feed::parse_rss_feed(&xml, limit)
}
