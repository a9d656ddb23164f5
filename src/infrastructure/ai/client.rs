//! Gemini-backed recommendation provider.
//!
//! Best-effort by contract: every failure mode (transport, non-2xx status,
//! unparseable body) is logged at warn level and yields an empty list, so the
//! audit pipeline never fails because of the AI service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::entities::CTAElement;
use crate::domain::recommendation_provider::RecommendationProvider;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// How many elements are summarized in the prompt. Enough context for useful
/// suggestions without blowing up the prompt on link-heavy pages.
const PROMPT_ELEMENT_LIMIT: usize = 10;

/// Upper bound on recommendations extracted from one response.
const MAX_RECOMMENDATIONS: usize = 5;

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
            api_key,
        })
    }

    /// Overrides the API origin. Used by tests running against a local mock
    /// server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_prompt(url: &str, elements: &[CTAElement]) -> String {
        let mut lines = Vec::with_capacity(elements.len().min(PROMPT_ELEMENT_LIMIT) + 4);
        lines.push(format!(
            "Analyze these call-to-action elements from {url} and suggest improvements:"
        ));
        lines.push(String::new());
        for element in elements.iter().take(PROMPT_ELEMENT_LIMIT) {
            lines.push(format!(
                "- {} \"{}\" at ({}, {})",
                element.element_type,
                element.text,
                element.position.x,
                element.position.y
            ));
        }
        lines.push(String::new());
        lines.push(format!(
            "Provide up to {MAX_RECOMMENDATIONS} specific, actionable recommendations as a numbered list."
        ));
        lines.join("\n")
    }

    async fn generate(&self, prompt: String) -> anyhow::Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.4,
                max_output_tokens: 1024,
            },
        };

        debug!(model = %self.model, "requesting AI recommendations");
        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            anyhow::bail!("AI service returned {status}: {body}");
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .unwrap_or_default();
        Ok(text)
    }
}

#[async_trait]
impl RecommendationProvider for GeminiClient {
    async fn recommend(&self, url: &str, elements: &[CTAElement]) -> Vec<String> {
        if elements.is_empty() {
            return Vec::new();
        }
        let prompt = Self::build_prompt(url, elements);
        match self.generate(prompt).await {
            Ok(text) => parse_recommendations(&text),
            Err(err) => {
                warn!(error = %err, "AI recommendations unavailable");
                Vec::new()
            }
        }
    }
}

/// Extracts recommendation lines from model output.
///
/// Accepts numbered ("1." / "2)") and bulleted ("-", "*", "•") list items,
/// strips the marker, and caps the result. Prose lines between items are
/// ignored.
pub fn parse_recommendations(text: &str) -> Vec<String> {
    let mut recs = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        let stripped = if let Some(rest) = line.strip_prefix(['-', '*', '•']) {
            rest
        } else if line.starts_with(|c: char| c.is_ascii_digit()) {
            let after_digits = line.trim_start_matches(|c: char| c.is_ascii_digit());
            match after_digits.strip_prefix(['.', ')']) {
                Some(rest) => rest,
                None => continue,
            }
        } else {
            continue;
        };

        let rec = stripped.trim();
        if !rec.is_empty() {
            recs.push(rec.to_string());
        }
        if recs.len() == MAX_RECOMMENDATIONS {
            break;
        }
    }
    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbered_list() {
        let text = "Here are my suggestions:\n\n1. Move the CTA above the fold\n2. Use contrasting colors\n3) Shorten the button text";
        let recs = parse_recommendations(text);
        assert_eq!(
            recs,
            vec![
                "Move the CTA above the fold",
                "Use contrasting colors",
                "Shorten the button text",
            ]
        );
    }

    #[test]
    fn test_parse_bulleted_list() {
        let text = "- Add urgency\n* Fix the broken link\n• Increase touch target size";
        let recs = parse_recommendations(text);
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0], "Add urgency");
        assert_eq!(recs[2], "Increase touch target size");
    }

    #[test]
    fn test_parse_caps_at_five() {
        let text = (1..=8)
            .map(|i| format!("{i}. Recommendation {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(parse_recommendations(&text).len(), 5);
    }

    #[test]
    fn test_parse_ignores_prose_and_blank_lines() {
        let text = "The page looks decent overall.\n\n1. Improve contrast\nSome elaboration here.\n2. \n3. Add an aria-label";
        let recs = parse_recommendations(text);
        assert_eq!(recs, vec!["Improve contrast", "Add an aria-label"]);
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_recommendations("").is_empty());
        assert!(parse_recommendations("No list here, just prose.").is_empty());
    }
}
