use anyhow::Result;
use paper_style_server::{config, server};
use tracing::info;

/// Rejects a `RUST_LOG` or `server.logs.level` value that tracing cannot parse.
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration is loaded before logging so that it can pick the level
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());

    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))?,
        )
        .json()
        .init();

    info!("Starting paper style server with log level: {}", log_level);
    info!(
        "Endpoints: GET /api/health, POST /api/image-edit, POST /api/debug-response, static files from {}",
        config.server.static_dir
    );

    server::run(config).await?;

    Ok(())
}
