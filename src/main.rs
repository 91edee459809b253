use std::sync::Arc;

use bookmarks::config::{Cli, Config, Environment, default_config_path};
use bookmarks::db::Database;
use bookmarks::handler::AppState;
use bookmarks::router::app;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

fn init_tracing(environment: Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if environment.is_production() {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn load_config(args: &Cli) -> anyhow::Result<Config> {
    match &args.config_path {
        Some(path) => Config::new(path),
        None => {
            let path = default_config_path();
            if path.exists() {
                Config::new(&path.to_string_lossy())
            } else {
                Config::from_env()
            }
        }
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    // Tracing is not up yet, so config errors go to stderr.
    let cfg = load_config(&args).unwrap_or_else(|e| {
        eprintln!("failed to load config: {:#}", e);
        std::process::exit(1);
    });

    init_tracing(cfg.app.environment);
    tracing::info!(environment = ?cfg.app.environment, "bookmarks.svc starting");

    let db = Arc::new(Database::new(&cfg).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup database");
        std::process::exit(1);
    }));

    let address = format!("0.0.0.0:{}", cfg.app.get_port());
    let app = app(AppState::from_config(db, &cfg));

    let listener = tokio::net::TcpListener::bind(&address).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup tcp listener");
        std::process::exit(1);
    });

    tracing::info!("bookmarks.svc running on {}", &address);
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl+c");
        }
        tracing::info!("ctrl+c signal received, preparing to shutdown");
    };

    if let Err(err) = axum::serve(listener, app).with_graceful_shutdown(shutdown).await {
        tracing::error!(error = %err, "server error");
        std::process::exit(1);
    }

    tracing::info!("bookmarks.svc going off, graceful shutdown complete");
}
