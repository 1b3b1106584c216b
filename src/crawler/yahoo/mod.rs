//! # Yahoo Finance crawler
//!
//! Two endpoints are used:
//!
//! - the finance search API (`search`), used as the first remote
//!   symbol-resolution fallback;
//! - the RSS headline feed (`rss`), one of the news sources feeding
//!   sentiment scoring.

/// RSS headline feed
pub mod rss;
/// Finance search API
pub mod search;

/// Host of the finance search API.
pub const SEARCH_HOST: &str = "query2.finance.yahoo.com";

/// Host of the RSS headline feed.
pub const FEED_HOST: &str = "feeds.finance.yahoo.com";

/// Suffix marking a National Stock Exchange listing in Yahoo symbols.
pub const NSE_SUFFIX: &str = ".NS";

/// Yahoo Finance crawler, the implementation carrier for `SymbolSearch`.
pub struct Yahoo {}
