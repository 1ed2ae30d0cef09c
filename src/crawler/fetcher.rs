//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the configured user agent and timeout
//! - The availability probe run before every full fetch
//! - GET requests that fetch and parse page content
//! - Error classification
//!
//! The engine only talks to the [`PageFetcher`] trait, so tests and embedders
//! can swap in a fetcher that never touches the network.

use crate::config::UserAgentConfig;
use crate::crawler::parser::{parse_document, Document};
use crate::{CrawlError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Source of pages for the crawl engine
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Cheap availability check run before a full fetch
    ///
    /// Returns true only if the URL answered with HTTP 200 within `timeout`.
    async fn probe(&self, url: &str, timeout: Duration) -> bool;

    /// Fetches and parses the page at `url`
    async fn fetch(&self, url: &str) -> Result<Document>;
}

/// [`PageFetcher`] backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher whose requests all carry `request_timeout`
    pub fn new(user_agent: &UserAgentConfig, request_timeout: Duration) -> Result<Self> {
        let client = build_http_client(user_agent, request_timeout)?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn probe(&self, url: &str, timeout: Duration) -> bool {
        check_availability(&self.client, url, timeout).await
    }

    async fn fetch(&self, url: &str) -> Result<Document> {
        fetch_document(&self.client, url).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// The timeout bounds every request made with the client, so a hanging
/// server cannot stall a crawl level past it.
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `request_timeout` - Connect and total timeout for each request
///
/// # Example
///
/// ```no_run
/// use breakpoint_crawler::config::UserAgentConfig;
/// use breakpoint_crawler::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(5)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    request_timeout: Duration,
) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(request_timeout)
        .connect_timeout(request_timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Checks whether a URL answers with HTTP 200
///
/// Any transport error, timeout or non-200 status (redirects are followed
/// first) counts as unavailable. The response body is not read.
pub async fn check_availability(client: &Client, url: &str, timeout: Duration) -> bool {
    match client.get(url).timeout(timeout).send().await {
        Ok(response) => {
            let status = response.status();
            if status != StatusCode::OK {
                tracing::debug!("Probe for {} returned {}", url, status);
            }
            status == StatusCode::OK
        }
        Err(e) => {
            tracing::debug!("Probe for {} failed: {}", url, e);
            false
        }
    }
}

/// Fetches a URL and parses it into a [`Document`]
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | Timeout | `CrawlError::Timeout` |
/// | Non-2xx status | `CrawlError::Status` |
/// | Connection/body failure | `CrawlError::Http` |
pub async fn fetch_document(client: &Client, url: &str) -> Result<Document> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CrawlError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| classify_error(url, e))?;

    Ok(parse_document(&body))
}

fn classify_error(url: &str, error: reqwest::Error) -> CrawlError {
    if error.is_timeout() {
        CrawlError::Timeout {
            url: url.to_string(),
        }
    } else {
        CrawlError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
