//! # Sentiment collection
//!
//! Gathers recent text about a company from the news and social crawlers,
//! scores each snippet with the lexicon, and exports the signals next to
//! the financial data. A source that fails only logs; the remaining
//! sources still contribute.

pub mod lexicon;

use anyhow::Result;
use serde::Serialize;

use crate::crawler::{google_news, hacker_news, nitter, seeking_alpha, yahoo};
use crate::resolver::dictionary;
use crate::{exporter, logging};

const GOOGLE_NEWS_LIMIT: usize = 40;
const YAHOO_HEADLINE_LIMIT: usize = 60;
const SEEKING_ALPHA_LIMIT: usize = 30;
const HACKER_NEWS_LIMIT: usize = 30;
const NITTER_LIMIT: usize = 150;

/// One scored snippet of text from a named source.
#[derive(Debug, Clone, Serialize)]
pub struct SentimentSignal {
    pub source: String,
    pub text: String,
    #[serde(rename = "sentiment")]
    pub score: f64,
}

impl SentimentSignal {
    fn new(source: &str, text: String) -> Self {
        let score = lexicon::score_text(&text);
        SentimentSignal {
            source: source.to_string(),
            text,
            score,
        }
    }
}

/// Collects and scores signals from every source.
///
/// Source order is fixed: Google News, Yahoo Finance, Seeking Alpha,
/// Hacker News, Nitter. Failures are logged per source and never abort the
/// collection.
pub async fn collect_signals(company_name: &str, symbol: &str) -> Vec<SentimentSignal> {
    let mut signals = Vec::new();
    let terms = relevance_terms(company_name, symbol);

    match google_news::fetch_news(company_name, GOOGLE_NEWS_LIMIT).await {
        Ok(items) => {
            signals.extend(
                items
                    .into_iter()
                    .map(|item| SentimentSignal::new("google_news", item.full_text())),
            );
        }
        Err(why) => {
            logging::debug_file_async(format!(
                "Failed to collect from Google News because {:?}",
                why
            ));
        }
    }

    let ticker = format!("{}{}", symbol, yahoo::NSE_SUFFIX);
    match yahoo::rss::fetch_headlines(&ticker, YAHOO_HEADLINE_LIMIT).await {
        Ok(items) => {
            signals.extend(
                items
                    .into_iter()
                    .map(|item| item.full_text())
                    .filter(|text| is_relevant(text, &terms))
                    .map(|text| SentimentSignal::new("yahoo_finance", text)),
            );
        }
        Err(why) => {
            logging::debug_file_async(format!(
                "Failed to collect from Yahoo Finance because {:?}",
                why
            ));
        }
    }

    match seeking_alpha::search_titles(company_name, SEEKING_ALPHA_LIMIT).await {
        Ok(titles) => {
            signals.extend(
                titles
                    .into_iter()
                    .filter(|title| is_relevant(title, &terms))
                    .map(|title| SentimentSignal::new("seeking_alpha", title)),
            );
        }
        Err(why) => {
            logging::debug_file_async(format!(
                "Failed to collect from Seeking Alpha because {:?}",
                why
            ));
        }
    }

    match hacker_news::search_titles(company_name, HACKER_NEWS_LIMIT).await {
        Ok(titles) => {
            signals.extend(
                titles
                    .into_iter()
                    .map(|title| SentimentSignal::new("hacker_news", title)),
            );
        }
        Err(why) => {
            logging::debug_file_async(format!(
                "Failed to collect from Hacker News because {:?}",
                why
            ));
        }
    }

    match nitter::fetch_tweets(company_name, NITTER_LIMIT).await {
        Ok(tweets) => {
            signals.extend(
                tweets
                    .into_iter()
                    .map(|tweet| SentimentSignal::new("nitter", tweet)),
            );
        }
        Err(why) => {
            logging::debug_file_async(format!("Failed to collect from Nitter because {:?}", why));
        }
    }

    signals
}

/// Collects signals for a company and writes them to
/// `<company>_sentiment.csv` and `<company>_sentiment.json`. Returns the
/// number of signals written.
pub async fn run(company_name: &str, symbol: &str) -> Result<usize> {
    let signals = collect_signals(company_name, symbol).await;
    if signals.is_empty() {
        logging::warn_file_async(format!(
            "No sentiment signals collected for {}",
            company_name
        ));
        return Ok(0);
    }

    let stem = sanitized_stem(company_name);
    exporter::write_sentiment_csv(&format!("{}_sentiment.csv", stem), &signals)?;
    exporter::write_sentiment_json(&format!("{}_sentiment.json", stem), &signals)?;

    let mean = signals.iter().map(|s| s.score).sum::<f64>() / signals.len() as f64;
    logging::info_file_async(format!(
        "Collected {} sentiment signals for {} (mean score {:.3})",
        signals.len(),
        company_name,
        mean
    ));

    Ok(signals.len())
}

/// Lowercased terms a Yahoo headline must mention to count as relevant.
fn relevance_terms(company_name: &str, symbol: &str) -> Vec<String> {
    let mut terms = dictionary::relevance_terms(symbol);
    terms.push(company_name.to_lowercase());
    terms.push(symbol.to_lowercase());
    terms
}

fn is_relevant(text: &str, terms: &[String]) -> bool {
    let lowered = text.to_lowercase();
    terms.iter().any(|term| lowered.contains(term))
}

/// File-name stem for a company: lowercased, anything that is not
/// alphanumeric becomes an underscore.
fn sanitized_stem(company_name: &str) -> String {
    company_name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_relevant() {
        let terms = relevance_terms("Tata Consultancy Services", "TCS");

        assert!(is_relevant("TCS shares rally on strong results", &terms));
        assert!(is_relevant(
            "Tata Consultancy Services wins new deal",
            &terms
        ));
        assert!(!is_relevant("Oil prices slip on demand worries", &terms));
    }

    #[test]
    fn test_sanitized_stem() {
        assert_eq!(sanitized_stem("Tata Consultancy"), "tata_consultancy");
        assert_eq!(sanitized_stem("L&T Finance "), "l_t_finance");
    }

    #[test]
    fn test_signal_scoring() {
        let signal = SentimentSignal::new("google_news", "Profit surges to a record".to_string());
        assert_eq!(signal.source, "google_news");
        assert!(signal.score > 0.0);
    }

    #[tokio::test]
    #[ignore]
    async fn test_collect_signals() {
        dotenv::dotenv().ok();
        logging::debug_file_async("start collect_signals".to_string());

        let signals = collect_signals("Infosys", "INFY").await;
        dbg!(signals.len());

        logging::debug_file_async("end collect_signals".to_string());
    }
}
