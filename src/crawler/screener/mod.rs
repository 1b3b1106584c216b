//! # Screener.in crawler
//!
//! Primary data source for this pipeline. Two endpoints are used:
//!
//! - the company search API (`search`), used as a symbol-resolution fallback;
//! - the consolidated company page (`financials`), scraped for the
//!   Profit & Loss, Balance Sheet, Cash Flow and Ratios tables.

/// Consolidated company page scraper
pub mod financials;
/// Company search API
pub mod search;

pub const HOST: &str = "www.screener.in";

/// Screener.in crawler, the implementation carrier for `SymbolSearch`.
pub struct Screener {}
