//! Storyboard server binary.

use std::sync::Arc;

use clap::Parser;
use storyboard_core::init_telemetry;
use storyboard_error::{ServerError, ServerErrorKind};
use storyboard_models::GeminiClient;
use storyboard_scenes::SceneFormatter;
use storyboard_server::{AppState, ServerConfig, router};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "storyboard", about = "Scene formatter API server")]
struct Args {
    /// Path to a configuration file (overrides the default search chain)
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Port to listen on (overrides configuration)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads GEMINI_API_KEY or STORYBOARD_* vars.
    dotenvy::dotenv().ok();
    init_telemetry()?;

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::load()?,
    };
    if let Some(port) = args.port {
        config.port = port;
    }

    let client = GeminiClient::with_default_model(&config.model);
    let key_configured = client.has_credential();
    if !key_configured {
        warn!("GEMINI_API_KEY is not set; format requests will fail until it is configured");
    }

    let formatter = SceneFormatter::with_options(client, config.format_options());
    let state = Arc::new(AppState::new(formatter, key_configured, config.port));
    let app = router(state, &config)?;

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Bind {
            addr: addr.clone(),
            message: e.to_string(),
        })
    })?;

    info!(
        port = config.port,
        model = %config.model,
        key_configured,
        "Storyboard server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;

    info!("Server shut down");
    Ok(())
}

/// Resolve on SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
