use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};

use fragments_server::api::{self, AppState};
use fragments_server::auth::AuthProvider;
use fragments_server::config::FragmentsConfig;

/// Fragments HTTP server.
#[derive(Parser, Debug)]
#[command(name = "fragments-server", about = "Standalone HTTP server for fragments")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "fragments.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration from TOML file, or use defaults if the file does not exist.
    let config_exists = Path::new(&cli.config).exists();
    let mut config: FragmentsConfig = if config_exists {
        let contents = std::fs::read_to_string(&cli.config)?;
        toml::from_str(&contents)?
    } else {
        toml::from_str("")?
    };

    fragments_server::telemetry::init(&config.logging);

    if !config_exists {
        info!(path = %cli.config, "config file not found, using defaults");
    }

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let fragments = fragments_server::store_factory::create_fragments(&config).await?;

    let auth = if config.auth.enabled {
        let provider = AuthProvider::new(&config.auth.users);
        if provider.is_empty() {
            warn!("auth is enabled but no users are configured; every request will be rejected");
        }
        info!(users = provider.len(), "basic auth enabled");
        Some(Arc::new(provider))
    } else {
        warn!("auth disabled: Basic usernames are trusted without a password check");
        None
    };

    let state = AppState {
        fragments,
        auth,
        external_url: config.server.public_url(),
        max_body_bytes: config.server.max_body_bytes,
    };
    let app = api::router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "fragments-server listening");

    // Serve with graceful shutdown on SIGINT / SIGTERM.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("fragments-server stopped");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM, then return to trigger graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
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
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
