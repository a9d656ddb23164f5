//! Engine configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any audit
//! runs.
//!
//! ## Optional Variables
//!
//! - `LINK_WORKERS` - Concurrent link-check workers (default: 5, max: 64)
//! - `LINK_TIMEOUT_SECS` - Per-link check timeout in seconds (default: 10)
//! - `GEMINI_API_KEY` - Gemini API key (enables AI recommendations if set)
//! - `GEMINI_MODEL` - Gemini model name (default: `gemini-pro`)
//! - `AI_TIMEOUT_SECS` - AI request timeout in seconds (default: 60)
//! - `RUST_LOG` - Log level (default: `info`)

use anyhow::Result;
use std::env;
use std::time::Duration;

/// Engine configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of concurrent link-check workers.
    pub link_workers: usize,
    /// Per-link check timeout in seconds.
    pub link_timeout_secs: u64,
    /// Gemini API key. AI recommendations are skipped when unset.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    /// AI request timeout in seconds.
    pub ai_timeout_secs: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            link_workers: 5,
            link_timeout_secs: 10,
            gemini_api_key: None,
            gemini_model: "gemini-pro".to_string(),
            ai_timeout_secs: 60,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let link_workers = env::var("LINK_WORKERS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.link_workers);

        let link_timeout_secs = env::var("LINK_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.link_timeout_secs);

        let gemini_api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());

        let gemini_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| defaults.gemini_model.clone());

        let ai_timeout_secs = env::var("AI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.ai_timeout_secs);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| defaults.log_level.clone());

        Ok(Self {
            link_workers,
            link_timeout_secs,
            gemini_api_key,
            gemini_model,
            ai_timeout_secs,
            log_level,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `link_workers` is 0 or greater than 64
    /// - `link_timeout_secs` is 0
    /// - `ai_timeout_secs` is 0
    /// - `gemini_model` is empty
    pub fn validate(&self) -> Result<()> {
        if self.link_workers == 0 || self.link_workers > 64 {
            anyhow::bail!(
                "LINK_WORKERS must be between 1 and 64, got {}",
                self.link_workers
            );
        }

        if self.link_timeout_secs == 0 {
            anyhow::bail!("LINK_TIMEOUT_SECS must be greater than 0");
        }

        if self.ai_timeout_secs == 0 {
            anyhow::bail!("AI_TIMEOUT_SECS must be greater than 0");
        }

        if self.gemini_model.is_empty() {
            anyhow::bail!("GEMINI_MODEL must not be empty");
        }

        Ok(())
    }

    /// Returns whether AI recommendations are enabled.
    pub fn is_ai_enabled(&self) -> bool {
        self.gemini_api_key.is_some()
    }

    pub fn link_timeout(&self) -> Duration {
        Duration::from_secs(self.link_timeout_secs)
    }

    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Link workers: {}", self.link_workers);
        tracing::info!("  Link timeout: {}s", self.link_timeout_secs);

        if self.is_ai_enabled() {
            tracing::info!("  AI recommendations: enabled ({})", self.gemini_model);
        } else {
            tracing::info!("  AI recommendations: disabled");
        }

        tracing::info!("  Log level: {}", self.log_level);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
