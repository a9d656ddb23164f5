#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use cta_audit::domain::entities::{Position, Size};
use cta_audit::prelude::{
    AuditService, CTAElement, ElementType, ErrorCategory, LinkProbe, NoopProvider, ProbeResponse,
    RecommendationProvider,
};

/// Probe with a scripted response per URL. Unscripted URLs come back as
/// connection failures.
pub struct ScriptedProbe {
    responses: HashMap<String, Result<ProbeResponse, ErrorCategory>>,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(
            url.to_string(),
            Ok(ProbeResponse {
                status,
                final_url: url.to_string(),
                elapsed: 0.2,
            }),
        );
        self
    }

    pub fn slow(mut self, url: &str, status: u16, elapsed: f64) -> Self {
        self.responses.insert(
            url.to_string(),
            Ok(ProbeResponse {
                status,
                final_url: url.to_string(),
                elapsed,
            }),
        );
        self
    }

    pub fn redirect(mut self, url: &str, final_url: &str) -> Self {
        self.responses.insert(
            url.to_string(),
            Ok(ProbeResponse {
                status: 200,
                final_url: final_url.to_string(),
                elapsed: 0.2,
            }),
        );
        self
    }

    pub fn error(mut self, url: &str, category: ErrorCategory) -> Self {
        self.responses.insert(url.to_string(), Err(category));
        self
    }
}

#[async_trait]
impl LinkProbe for ScriptedProbe {
    async fn fetch(&self, url: &str) -> Result<ProbeResponse, ErrorCategory> {
        self.responses
            .get(url)
            .cloned()
            .unwrap_or(Err(ErrorCategory::Connection))
    }
}

pub fn audit_service(probe: ScriptedProbe) -> AuditService {
    AuditService::new(
        Arc::new(probe),
        Arc::new(NoopProvider),
        5,
        Duration::from_secs(10),
    )
}

/// Provider that returns a fixed recommendation list.
pub struct FixedProvider(pub Vec<String>);

#[async_trait]
impl RecommendationProvider for FixedProvider {
    async fn recommend(&self, _url: &str, _elements: &[CTAElement]) -> Vec<String> {
        self.0.clone()
    }
}

pub fn element(id: &str, element_type: ElementType, text: &str) -> CTAElement {
    CTAElement {
        element_id: id.to_string(),
        css_selector: format!("#{id}"),
        element_type,
        text: text.to_string(),
        aria_label: None,
        role: None,
        tabindex: None,
        position: Position { x: 100, y: 200 },
        size: Size {
            width: 160,
            height: 48,
        },
        z_index: None,
        html_id: Some(id.to_string()),
        html_class: Some("btn btn-primary".to_string()),
        text_color: None,
        background_color: None,
        href: None,
        link: None,
        is_visible: true,
        is_hidden: false,
        is_dropdown: false,
        is_js_generated: false,
        has_onclick: false,
    }
}

pub fn button(id: &str, text: &str) -> CTAElement {
    element(id, ElementType::Button, text)
}

pub fn link(id: &str, text: &str, href: &str) -> CTAElement {
    let mut el = element(id, ElementType::Link, text);
    el.href = Some(href.to_string());
    el
}
