use core::time::Duration;

use backon::Retryable;
use reqwest::Client;
use tokio::time::sleep;

use crate::{
    config::{CONNECTION_TIMEOUT, RetryPolicy},
    error::ScrapeError,
};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub fn basic(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .connect_timeout(CONNECTION_TIMEOUT)
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

async fn get(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status { status });
    }
    Ok(response.text().await?)
}

/// GETs `url`, retrying transport failures with exponential backoff.
pub async fn fetch(client: &Client, url: &str, policy: &RetryPolicy) -> Result<String, ScrapeError> {
    (|| get(client, url))
        .retry(policy.backoff())
        .sleep(sleep)
        .when(ScrapeError::is_retryable)
        .notify(|err: &ScrapeError, delay: Duration| {
            tracing::warn!(target: "fetch", "{url}: {err}, retrying in {delay:?}");
        })
        .await
}
