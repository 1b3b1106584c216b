//! # Nitter crawler
//!
//! Scrapes tweet text from public Nitter mirrors. Instances come and go,
//! so a list is tried in order and the first one that yields content wins.
//! All of them failing is not an error; the source just contributes
//! nothing that run.

use anyhow::Result;
use concat_string::concat_string;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::{logging, util};

/// Public mirrors, tried in order.
pub const INSTANCES: [&str; 3] = [
    "https://nitter.net",
    "https://nitter.privacydev.net",
    "https://nitter.lacontrevoie.fr",
];

static TWEET_CONTENT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".tweet-content").expect("Failed to parse tweet selector"));

/// Fetches recent tweet texts matching the query.
pub async fn fetch_tweets(query: &str, limit: usize) -> Result<Vec<String>> {
    let encoded = urlencoding::encode(query);

    for instance in INSTANCES {
        let url = concat_string!(instance, "/search?f=tweets&q=", encoded);

        util::http::throttle().await;
        let body = match util::http::get(&url, None).await {
            Ok(body) => body,
            Err(why) => {
                logging::debug_file_async(format!(
                    "Failed to fetch tweets from {} because {:?}",
                    instance, why
                ));
                continue;
            }
        };

        let tweets = extract_tweets(&body, limit);
        if !tweets.is_empty() {
            return Ok(tweets);
        }
    }

    Ok(Vec::new())
}

fn extract_tweets(body: &str, limit: usize) -> Vec<String> {
    let document = Html::parse_document(body);

    document
        .select(&TWEET_CONTENT_SELECTOR)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging;

    #[test]
    fn test_extract_tweets() {
        let body = r#"
        <html><body>
          <div class="timeline-item">
            <div class="tweet-content">TCS wins a major deal in Europe</div>
          </div>
          <div class="timeline-item">
            <div class="tweet-content">  </div>
          </div>
          <div class="timeline-item">
            <div class="tweet-content">Margins under pressure this quarter</div>
          </div>
        </body></html>"#;

        let tweets = extract_tweets(body, 10);
        assert_eq!(
            tweets,
            vec![
                "TCS wins a major deal in Europe".to_string(),
                "Margins under pressure this quarter".to_string()
            ]
        );

        assert_eq!(extract_tweets(body, 1).len(), 1);
        assert!(extract_tweets("<html></html>", 10).is_empty());
    }

    #[tokio::test]
    #[ignore]
    async fn test_fetch_tweets() {
        dotenv::dotenv().ok();
        logging::debug_file_async("start fetch_tweets".to_string());

        match fetch_tweets("Infosys", 5).await {
            Ok(tweets) => {
                dbg!(tweets.len());
                logging::debug_file_async(format!("{} tweets", tweets.len()));
            }
            Err(why) => {
                logging::debug_file_async(format!("Failed to fetch_tweets because {:?}", why));
            }
        }

        logging::debug_file_async("end fetch_tweets".to_string());
    }
}
