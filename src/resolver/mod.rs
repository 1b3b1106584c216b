//! # Symbol resolver
//!
//! Turns free-form user input ("tcs", "Reliance Industries", "RELAINCE")
//! into an NSE symbol. Cheap offline lookups run first; remote search APIs
//! are only consulted when the dictionary comes up empty. Resolution never
//! fails for a non-empty query: the last resort derives a cleaned
//! symbol-shaped guess from the input itself.

pub mod dictionary;

use anyhow::{anyhow, Result};

use crate::{crawler, logging};

/// Longest symbol the last-resort fallback will fabricate.
const FALLBACK_SYMBOL_LEN: usize = 7;

/// Resolves user input to an NSE symbol.
///
/// Lookup order: dictionary exact match, known-symbol match, fuzzy
/// dictionary match, remote search APIs, per-token retries of all of the
/// above, then [`fallback_symbol`]. Only an empty query is an error.
pub async fn resolve(query: &str) -> Result<String> {
    resolve_with(query, |q| async move {
        crawler::search_symbol_from_remote_site(&q).await
    })
    .await
}

/// [`resolve`] with the remote lookup as a parameter so the chain can be
/// exercised without the network.
async fn resolve_with<F, Fut>(query: &str, remote_lookup: F) -> Result<String>
where
    F: Fn(String) -> Fut,
    Fut: std::future::Future<Output = Option<String>>,
{
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("Company name cannot be empty"));
    }

    if let Some(symbol) = resolve_offline(trimmed) {
        return Ok(symbol.to_string());
    }

    if let Some(symbol) = remote_lookup(trimmed.to_string()).await {
        return Ok(symbol);
    }

    // Multi-word queries often carry one token that resolves cleanly
    // ("Reliance Industries Limited" -> "reliance").
    for token in trimmed.split_whitespace() {
        if let Some(symbol) = resolve_offline(token) {
            return Ok(symbol.to_string());
        }
        if let Some(symbol) = remote_lookup(token.to_string()).await {
            return Ok(symbol);
        }
    }

    let fallback = fallback_symbol(trimmed);
    logging::warn_file_async(format!(
        "Could not resolve '{}' to a listed symbol, using fallback {}",
        trimmed, fallback
    ));

    Ok(fallback)
}

fn resolve_offline(query: &str) -> Option<&'static str> {
    dictionary::exact(query)
        .or_else(|| dictionary::by_symbol(query))
        .or_else(|| dictionary::closest(query))
}

/// Derives a symbol-shaped string from unresolvable input: alphabetic
/// characters only, uppercased, capped at seven characters. Input with no
/// alphabetic characters at all yields `UNKNOWN`.
pub fn fallback_symbol(query: &str) -> String {
    let symbol: String = query
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(FALLBACK_SYMBOL_LEN)
        .collect::<String>()
        .to_uppercase();

    if symbol.is_empty() {
        "UNKNOWN".to_string()
    } else {
        symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_rejects_empty_input() {
        assert!(resolve("").await.is_err());
        assert!(resolve("   ").await.is_err());
    }

    #[test]
    fn test_resolve_offline() {
        assert_eq!(resolve_offline("tcs"), Some("TCS"));
        assert_eq!(resolve_offline("INFY"), Some("INFY"));
        assert_eq!(resolve_offline("Ambuja"), Some("AMBUJACEM"));
        assert_eq!(resolve_offline("relaince"), Some("RELIANCE"));
        assert_eq!(resolve_offline("qqqqqq"), None);
    }

    #[tokio::test]
    async fn test_resolve_tries_every_token() {
        use std::sync::{Arc, Mutex};

        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();

        let symbol = resolve_with("ZX Unlisted Co", move |query| {
            let seen = recorder.clone();
            async move {
                seen.lock().unwrap().push(query);
                None
            }
        })
        .await
        .unwrap();

        // Full query first, then every whitespace token, short ones included.
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["ZX Unlisted Co", "ZX", "Unlisted", "Co"]
        );
        assert_eq!(symbol, "ZXUNLIS");
    }

    #[tokio::test]
    async fn test_resolve_with_remote_hit_on_token() {
        let symbol = resolve_with("Unlisted SBIN", |query| async move {
            (query == "SBIN").then(|| "SBIN".to_string())
        })
        .await
        .unwrap();

        assert_eq!(symbol, "SBIN");
    }

    #[test]
    fn test_fallback_symbol() {
        assert_eq!(fallback_symbol("Some Unknown Company"), "SOMEUNK");
        assert_eq!(fallback_symbol("abc"), "ABC");
        assert_eq!(fallback_symbol("123 456!"), "UNKNOWN");
    }

    #[tokio::test]
    #[ignore]
    async fn test_resolve_remote() {
        dotenv::dotenv().ok();

        match resolve("State Bank of India").await {
            Ok(symbol) => {
                dbg!(&symbol);
            }
            Err(why) => {
                panic!("Failed to resolve because {:?}", why);
            }
        }
    }
}
