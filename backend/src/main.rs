use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use greeting_service::config::{Config, LoggingConfig};
use greeting_service::localization::LocaleCatalog;
use greeting_service::services::GreetingService;
use greeting_service::{AppState, build_router};

#[derive(Parser, Debug)]
#[command(name = "greeting-service", about = "Localized greeting service")]
struct Cli {
    /// Path to config.toml (default: conf/config.toml)
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let _log_guard = init_tracing(&config.logging);

    let catalog = Arc::new(
        LocaleCatalog::from_config(&config.localization)
            .context("Invalid [localization] configuration")?,
    );
    tracing::info!(
        "Culture negotiation: default={}/{}, {} supported culture(s), {} provider(s)",
        catalog.default_culture.culture,
        catalog.default_culture.ui_culture,
        catalog.supported_cultures.len(),
        catalog.providers.len()
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState {
        config,
        catalog,
        greeting_service: GreetingService::new(),
    });

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

/// Log to a rolling daily file when one is configured, to the console
/// otherwise. The returned guard must stay alive for the file writer to
/// flush.
fn init_tracing(cfg: &LoggingConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    match &cfg.file {
        Some(file) => {
            let path = std::path::Path::new(file);
            let dir = path.parent().unwrap_or_else(|| std::path::Path::new("logs"));
            let name = path.file_name().unwrap_or_else(|| std::ffi::OsStr::new("greeting-service.log"));
            let appender = tracing_appender::rolling::daily(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        },
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            None
        },
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        return;
    }
    tracing::info!("Shutdown signal received");
}
