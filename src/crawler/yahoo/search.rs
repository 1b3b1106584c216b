use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use crate::crawler::{
    yahoo::{Yahoo, NSE_SUFFIX, SEARCH_HOST},
    SymbolSearch,
};
use crate::util;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    quotes: Vec<QuoteEntry>,
}

#[derive(Debug, Deserialize)]
struct QuoteEntry {
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    exchange: String,
}

#[async_trait]
impl SymbolSearch for Yahoo {
    /// Queries the Yahoo finance search API and returns the first quote
    /// listed on the NSE, with the market suffix stripped.
    async fn search_symbol(query: &str) -> Result<Option<String>> {
        let url = format!(
            "https://{host}/v1/finance/search?q={query}&quotesCount=10&newsCount=0",
            host = SEARCH_HOST,
            query = urlencoding::encode(query)
        );

        util::http::throttle().await;
        let response: SearchResponse = util::http::get_json(&url).await?;

        Ok(response
            .quotes
            .into_iter()
            .find(|quote| quote.symbol.ends_with(NSE_SUFFIX) || quote.exchange == "NSI")
            .map(|quote| quote.symbol.trim_end_matches(NSE_SUFFIX).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging;

    #[test]
    fn test_search_response_deserialize() {
        let payload = r#"{"quotes":[
            {"symbol":"TCS.NS","exchange":"NSI","shortname":"Tata Consultancy"},
            {"symbol":"TCS","exchange":"NYQ"}
        ]}"#;

        let response: SearchResponse = serde_json::from_str(payload).expect("should deserialize");
        assert_eq!(response.quotes.len(), 2);
        assert_eq!(response.quotes[0].symbol, "TCS.NS");
        assert_eq!(response.quotes[1].exchange, "NYQ");
    }

    #[tokio::test]
    #[ignore]
    async fn test_search_symbol() {
        dotenv::dotenv().ok();
        logging::debug_file_async("start search_symbol".to_string());

        match Yahoo::search_symbol("reliance").await {
            Ok(symbol) => {
                dbg!(&symbol);
                logging::debug_file_async(format!("symbol: {:?}", symbol));
            }
            Err(why) => {
                logging::debug_file_async(format!("Failed to search_symbol because {:?}", why));
            }
        }

        logging::debug_file_async("end search_symbol".to_string());
    }
}
