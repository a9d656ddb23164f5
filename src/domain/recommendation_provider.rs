//! External recommendation-service seam.

use async_trait::async_trait;

use crate::domain::entities::CTAElement;

/// Supplies supplementary, externally generated recommendations.
///
/// Implementations must be infallible from the engine's point of view: any
/// transport or parse failure is logged and surfaces as an empty list, never
/// as an audit failure.
#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    async fn recommend(&self, url: &str, elements: &[CTAElement]) -> Vec<String>;
}

/// Provider for callers without an external service configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProvider;

#[async_trait]
impl RecommendationProvider for NoopProvider {
    async fn recommend(&self, _url: &str, _elements: &[CTAElement]) -> Vec<String> {
        Vec::new()
    }
}
