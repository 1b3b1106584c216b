use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use crate::crawler::{
    screener::{Screener, HOST},
    SymbolSearch,
};
use crate::util;

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    #[allow(dead_code)]
    name: String,
}

#[async_trait]
impl SymbolSearch for Screener {
    /// Queries the Screener company search API and returns the first
    /// non-empty symbol, uppercased.
    async fn search_symbol(query: &str) -> Result<Option<String>> {
        let url = format!(
            "https://{host}/api/company/search/?q={query}",
            host = HOST,
            query = urlencoding::encode(query)
        );

        util::http::throttle().await;
        let results: Vec<SearchResult> = util::http::get_json(&url).await?;

        Ok(results
            .into_iter()
            .map(|r| r.symbol)
            .find(|symbol| !symbol.is_empty())
            .map(|symbol| symbol.to_uppercase()))
    }
}
