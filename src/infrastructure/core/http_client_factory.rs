use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates an HTTP client for feed polling.
    ///
    /// `timeout` bounds the whole request; connecting is bounded by the same
    /// value or 5s, whichever is lower.
    pub fn create_client(timeout: Duration) -> Result<Client> {
        Client::builder()
            .pool_max_idle_per_host(2)
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .user_agent(concat!("taixiu/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build feed HTTP client")
    }
}
