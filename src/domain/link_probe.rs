//! Outbound-link probe abstraction.
//!
//! The validation stage depends on this trait rather than a concrete HTTP
//! client, mirroring the repository seams elsewhere in the crate: production
//! wires in the reqwest-backed checker, tests inject fakes with scripted
//! latencies and failures.

use async_trait::async_trait;

use crate::domain::entities::ErrorCategory;

/// Successful transport-level fetch of a destination URL.
///
/// Any HTTP status counts as a response here; status classification is the
/// validation stage's job.
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    pub status: u16,
    /// URL after following redirects.
    pub final_url: String,
    /// Wall-clock duration of the request in seconds.
    pub elapsed: f64,
}

/// Fetches one URL and reports either a response or a classified transport
/// failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkProbe: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<ProbeResponse, ErrorCategory>;
}
