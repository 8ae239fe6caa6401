// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::error::{AppError, Result};
use crate::models::HttpConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &HttpConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch a URL and return its body as text.
///
/// Non-success statuses become [`AppError::Fetch`] with the URL as context.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;
    read_body(url, response).await
}

/// POST a JSON document and return the response body as text.
pub async fn post_json(
    client: &reqwest::Client,
    url: &str,
    body: &serde_json::Value,
) -> Result<String> {
    let response = client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .body(serde_json::to_string(body)?)
        .send()
        .await?;
    read_body(url, response).await
}

async fn read_body(url: &str, response: reqwest::Response) -> Result<String> {
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::fetch(url, format!("status {status}")));
    }
    Ok(response.text().await?)
}
