use std::time::Duration;

use anyhow::{anyhow, Result};
use once_cell::sync::{Lazy, OnceCell};
use reqwest::{header, Client, Method, Response};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;

use crate::config::SETTINGS;

pub mod element;
pub mod user_agent;

/// Limits concurrent requests so target sites do not ban us.
static SEMAPHORE: Lazy<Semaphore> = Lazy::new(|| Semaphore::new(5));

/// A singleton instance of the reqwest client.
static CLIENT: OnceCell<Client> = OnceCell::new();

/// Returns the reqwest client singleton instance or creates one if it doesn't exist.
fn get_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .brotli(true)
            .gzip(true)
            .connect_timeout(Duration::from_secs(8))
            .timeout(Duration::from_secs(15))
            .tcp_nodelay(true)
            .tcp_keepalive(Duration::from_secs(60))
            .pool_max_idle_per_host(20)
            .pool_idle_timeout(Duration::from_secs(90))
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(5))
            .referer(true)
            .user_agent(user_agent::gen_random_ua())
            .build()
            .map_err(|e| anyhow!("Failed to create reqwest client: {:?}", e))
    })
}

/// Sleeps for the configured delay before a rate-limited remote call.
pub async fn throttle() {
    tokio::time::sleep(Duration::from_millis(SETTINGS.system.request_delay_ms)).await;
}

pub async fn get_response(url: &str, headers: Option<header::HeaderMap>) -> Result<Response> {
    send(Method::GET, url, headers).await
}

/// Performs an HTTP GET request and returns the response as text.
pub async fn get(url: &str, headers: Option<header::HeaderMap>) -> Result<String> {
    get_response(url, headers)
        .await?
        .text()
        .await
        .map_err(|e| anyhow!("Error parsing response text: {:?}", e))
}

/// Performs an HTTP GET request and deserializes the JSON response into the specified type.
pub async fn get_json<RES: DeserializeOwned>(url: &str) -> Result<RES> {
    get_response(url, None)
        .await?
        .json::<RES>()
        .await
        .map_err(|e| anyhow!("Error parsing response JSON: {:?}", e))
}

async fn send(
    method: Method,
    url: &str,
    headers: Option<header::HeaderMap>,
) -> Result<Response> {
    let _permit = SEMAPHORE
        .acquire()
        .await
        .map_err(|e| anyhow!("Failed to acquire request permit: {:?}", e))?;
    let client = get_client()?;

    let mut request_builder = client.request(method, url);
    if let Some(headers) = headers {
        request_builder = request_builder.headers(headers);
    }

    request_builder
        .send()
        .await
        .map_err(|e| anyhow!("Failed to request {} because {:?}", url, e))
}
