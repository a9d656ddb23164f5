//! CLI entry point: audits a captured element snapshot and prints the
//! report as JSON.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cta_audit::config;
use cta_audit::infrastructure::ai::GeminiClient;
use cta_audit::prelude::{
    AuditService, CTAElement, HttpLinkChecker, NoopProvider, RecommendationProvider,
};

#[derive(Debug, Parser)]
#[command(name = "cta-audit", about = "Score and audit a page's call-to-action elements")]
struct Cli {
    /// URL of the audited page.
    #[arg(long)]
    url: String,

    /// Path to the captured element snapshot (JSON array).
    #[arg(long)]
    snapshot: PathBuf,

    /// Label recorded in the report.
    #[arg(long, default_value = "Comprehensive CTA Audit")]
    analysis_type: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = config::load_from_env()?;
    config.print_summary();

    let snapshot = fs::read_to_string(&cli.snapshot)?;
    let elements: Vec<CTAElement> = serde_json::from_str(&snapshot)?;

    let probe = Arc::new(HttpLinkChecker::new(config.link_timeout())?);
    let provider: Arc<dyn RecommendationProvider> = match &config.gemini_api_key {
        Some(key) => Arc::new(GeminiClient::new(
            key.clone(),
            config.gemini_model.clone(),
            config.ai_timeout(),
        )?),
        None => Arc::new(NoopProvider),
    };

    let service = AuditService::new(probe, provider, config.link_workers, config.link_timeout());
    let report = service.audit(&cli.url, &cli.analysis_type, elements).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
