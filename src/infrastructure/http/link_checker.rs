//! reqwest-backed implementation of the link probe.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, redirect};
use tracing::debug;

use crate::domain::entities::ErrorCategory;
use crate::domain::link_probe::{LinkProbe, ProbeResponse};

/// Browser-like request headers. Some sites answer 403 to anything that does
/// not look like a browser, which would skew the audit toward false
/// Forbidden findings.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

const MAX_REDIRECTS: usize = 10;

/// Probes destination URLs with GET requests, following redirects.
pub struct HttpLinkChecker {
    client: Client,
}

impl HttpLinkChecker {
    /// Builds a checker with a per-request timeout.
    ///
    /// The pool applies its own timeout around each check as well; the client
    /// timeout here bounds the request even if the pool's is configured
    /// longer.
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .gzip(true)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl LinkProbe for HttpLinkChecker {
    async fn fetch(&self, url: &str) -> Result<ProbeResponse, ErrorCategory> {
        let started = Instant::now();
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .header(reqwest::header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .send()
            .await
            .map_err(classify_error)?;

        let elapsed = started.elapsed().as_secs_f64();
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        debug!(%url, status, elapsed, "probe completed");

        Ok(ProbeResponse {
            status,
            final_url,
            elapsed,
        })
    }
}

/// Maps a transport failure onto the closed error taxonomy. Classification
/// is structural (reqwest's error kind) with one textual fallback for TLS,
/// which reqwest does not expose as a dedicated kind.
fn classify_error(err: reqwest::Error) -> ErrorCategory {
    if err.is_timeout() {
        return ErrorCategory::Timeout;
    }
    if err.is_redirect() {
        return ErrorCategory::TooManyRedirects;
    }
    if err.is_builder() {
        return ErrorCategory::InvalidUrl;
    }

    let text = format!("{err:?}").to_lowercase();
    if text.contains("certificate") || text.contains("ssl") || text.contains("tls") {
        return ErrorCategory::Ssl;
    }
    if err.is_connect() {
        return ErrorCategory::Connection;
    }

    ErrorCategory::Other
}
