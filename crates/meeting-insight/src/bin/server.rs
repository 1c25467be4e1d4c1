//! Meeting-insight server binary
//!
//! Run with: cargo run -p meeting-insight --bin meeting-insight-server

use meeting_insight::{config::InsightConfig, server::InsightServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meeting_insight=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                     Meeting Insight                       ║
║        Transcript Analysis and Sales-Prep Notes           ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    // Load configuration (.env, optional TOML file, environment)
    let config = InsightConfig::load()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Gemini model: {}", config.llm.model);
    tracing::info!("  - Drive API: {}", config.drive.api_base);
    tracing::info!("  - Download chunk size: {} bytes", config.drive.chunk_size);
    tracing::info!(
        "  - Download failure policy: {:?}",
        config.ingestion.download_failure_policy
    );
    tracing::info!("  - Profile host: {}", config.profile.api_host);
    tracing::info!("  - Max request body: {} bytes", config.server.max_body_size);

    // Create and start server
    let server = InsightServer::new(config)?;

    println!("\nServer starting...");
    println!("  Health: http://{}/api/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/analyze   - Analyze transcript PDFs");
    println!("  POST /api/salesprep - Sales-prep notes");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
