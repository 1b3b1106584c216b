use anyhow::Result;
use async_trait::async_trait;

use crate::crawler::{screener::Screener, yahoo::Yahoo};
use crate::logging;

/// Google News RSS search feed
pub mod google_news;
/// Hacker News search API (hn.algolia.com)
pub mod hacker_news;
/// Nitter tweet search mirrors
pub mod nitter;
/// Screener.in financial data site
pub mod screener;
/// Seeking Alpha search-page scrape
pub mod seeking_alpha;
/// Yahoo Finance search API and news feed
pub mod yahoo;

/// A remote site that can look up a ticker symbol for a free-text query.
///
/// `Ok(None)` means the site answered but had no usable match; `Err` means
/// the lookup itself failed (network, unexpected payload). Callers that only
/// care about "did anything match" collapse both to no-match.
#[async_trait]
pub trait SymbolSearch {
    async fn search_symbol(query: &str) -> Result<Option<String>>;
}

/// Tries the remote symbol lookups in order and returns the first hit.
///
/// Lookup failures are logged and fall through to the next site; this never
/// raises.
pub async fn search_symbol_from_remote_site(query: &str) -> Option<String> {
    let sites = vec![Yahoo::search_symbol, Screener::search_symbol];

    for lookup in sites {
        match lookup(query).await {
            Ok(Some(symbol)) => return Some(symbol),
            Ok(None) => {}
            Err(why) => {
                logging::debug_file_async(format!(
                    "Symbol lookup for {} failed because {:?}",
                    query, why
                ));
            }
        }
    }

    None
}
