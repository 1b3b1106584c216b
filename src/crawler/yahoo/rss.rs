use anyhow::Result;

use crate::crawler::yahoo::FEED_HOST;
use crate::util::{
    self,
    feed::{self, RssItem},
};

/// Fetches the RSS headline feed for a Yahoo ticker (e.g. `TCS.NS`).
pub async fn fetch_headlines(ticker: &str, limit: usize) -> Result<Vec<RssItem>> {
    let url = format!(
        "https://{host}/rss/2.0/headline?s={ticker}&region=US&lang=en-US",
        host = FEED_HOST,
        ticker = urlencoding::encode(ticker)
    );

    let xml = util::http::get(&url, None).await?;
    feed::parse_rss_feed(&xml, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging;

    #[tokio::test]
    #[ignore]
    async fn test_fetch_headlines() {
        dotenv::dotenv().ok();
        logging::debug_file_async("start fetch_headlines".to_string());

        match fetch_headlines("TCS.NS", 5).await {
            Ok(items) => {
                dbg!(items.len());
                logging::debug_file_async(format!("{} headlines", items.len()));
            }
            Err(why) => {
                logging::debug_file_async(format!("Failed to fetch_headlines because {:?}", why));
            }
        }

        logging::debug_file_async("end fetch_headlines".to_string());
    }
}
