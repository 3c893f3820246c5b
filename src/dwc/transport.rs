//! HTTP transport for tenant interactions
//!
//! One `Transport` owns one cookie jar. The login handshake builds a fresh
//! transport and only hands it to the session once every step succeeded, so a
//! failed login leaves no partial cookies behind.

use log::{debug, warn};
use reqwest::cookie::Jar;
use reqwest::{Client, RequestBuilder, Url};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::browser;
use crate::error::{DwcError, Result};

/// Maximum length of a response body quoted in error messages
const MAX_ERROR_BODY: usize = 200;

/// Completed HTTP exchange with a success status
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    /// Final URL after redirects
    pub url: String,
    pub body: String,
    pub elapsed: Duration,
}

impl TransportResponse {
    /// Parse the body as JSON
    pub fn json(&self) -> Result<serde_json::Value> {
        if self.body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Cookie-carrying HTTP client impersonating a browser
pub struct Transport {
    client: Client,
    jar: Arc<Jar>,
    last_elapsed_us: AtomicU64,
}

impl Transport {
    /// Create a transport with an empty cookie jar
    pub fn new() -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .user_agent(browser::USER_AGENT)
            .cookie_provider(Arc::clone(&jar))
            .build()?;

        Ok(Self {
            client,
            jar,
            last_elapsed_us: AtomicU64::new(0),
        })
    }

    /// Set a cookie for the host of `url` (path `/`)
    pub fn add_cookie(&self, name: &str, value: &str, url: &str) -> Result<()> {
        let url = Url::parse(url)
            .map_err(|e| DwcError::InvalidInput(format!("Invalid URL '{}': {}", url, e)))?;
        self.jar
            .add_cookie_str(&format!("{}={}; Path=/", name, value), &url);
        Ok(())
    }

    /// Latency of the most recent call
    pub fn last_elapsed(&self) -> Duration {
        Duration::from_micros(self.last_elapsed_us.load(Ordering::Relaxed))
    }

    /// GET a URL
    pub async fn get(&self, url: &str) -> Result<TransportResponse> {
        self.send("GET", url, self.client.get(url)).await
    }

    /// POST without a body
    pub async fn post_empty(&self, url: &str) -> Result<TransportResponse> {
        self.send("POST", url, self.client.post(url)).await
    }

    /// POST an urlencoded form
    pub async fn post_form(&self, url: &str, form: &[(&str, String)]) -> Result<TransportResponse> {
        self.send("POST", url, self.client.post(url).form(form))
            .await
    }

    /// POST a JSON payload
    pub async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<TransportResponse> {
        self.send("POST", url, self.client.post(url).json(body))
            .await
    }

    /// PUT a JSON payload
    pub async fn put_json(&self, url: &str, body: &serde_json::Value) -> Result<TransportResponse> {
        self.send("PUT", url, self.client.put(url).json(body)).await
    }

    /// DELETE a URL
    pub async fn delete(&self, url: &str) -> Result<TransportResponse> {
        self.send("DELETE", url, self.client.delete(url)).await
    }

    /// Send a request, record its latency and classify the status
    async fn send(
        &self,
        method: &str,
        url: &str,
        builder: RequestBuilder,
    ) -> Result<TransportResponse> {
        let started = Instant::now();
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await?;
        let elapsed = started.elapsed();

        self.last_elapsed_us
            .store(elapsed.as_micros() as u64, Ordering::Relaxed);
        debug!("{} {} -> {} ({:?})", method, url, status, elapsed);

        if status >= 400 {
            warn!("{} {} failed with status {}", method, url, status);
            return Err(DwcError::Api {
                status,
                message: format!("{} {}: {}", method, url, truncate_body(&body)),
            });
        }

        Ok(TransportResponse {
            status,
            url: final_url,
            body,
            elapsed,
        })
    }
}

/// Shorten a response body for error messages
fn truncate_body(body: &str) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut end = MAX_ERROR_BODY;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    }
}
