use annotation_activity::{
    api::{build_router, AppState},
    config::Config,
    state::InMemoryStore,
};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "annotation-activity")]
#[command(about = "Annotation activity search pages", long_about = None)]
struct Cli {
    /// Configuration file layered over the built-in defaults
    #[arg(short, long, env = "ACTIVITY_CONFIG", default_value = "config/activity.toml")]
    config: String,

    /// JSON file with users, groups and annotations to serve
    #[arg(short, long)]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load_from(&cli.config).unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Using default configuration");
        Config::default()
    });

    init_tracing(&config);

    tracing::info!(
        "Starting {} v{}",
        config.observability.service_name,
        env!("CARGO_PKG_VERSION")
    );
    if !config.features.search_page {
        tracing::warn!("Search page feature is disabled, activity routes answer 404");
    }

    // Initialize storage
    let seed_path = cli.seed.or_else(|| config.store.seed_path.clone());
    let store = match seed_path {
        Some(path) => InMemoryStore::from_seed_file(&path)
            .with_context(|| format!("failed to load seed data from {}", path.display()))?,
        None => {
            tracing::warn!("No seed data configured, starting with an empty store");
            InMemoryStore::new()
        }
    };

    let app = build_router(AppState::new(Arc::new(store), config.clone()));

    // Start HTTP server
    let http_addr = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("failed to bind {}", http_addr))?;

    tracing::info!("HTTP server listening on http://{}", http_addr);
    tracing::info!("   Search: http://{}/search", http_addr);
    tracing::info!("   Health check: http://{}/health", http_addr);

    axum::serve(http_listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutdown signal received");
        })
        .await
        .context("HTTP server error")?;

    tracing::info!("Shut down gracefully");
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "annotation_activity={level},tower_http={level}",
            level = config.observability.log_level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.observability.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
