use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mummoom_api_rust::auth::JwtKeys;
use mummoom_api_rust::config::{self, AppConfig, StoreBackend};
use mummoom_api_rust::database::{DatabaseManager, MemoryStore, Repositories, Store};
use mummoom_api_rust::{app, is_development, AppState};

#[derive(Parser)]
#[command(name = "mummoom-api-rust", version, about = "Mummoom community board API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print a signed JWT for local testing
    Token {
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    let config = config::config();
    init_tracing(config);

    match Cli::parse().command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Token { email } => {
            let keys = JwtKeys::from_config(&config.security).context("JWT_SECRET must be set")?;
            println!("{}", keys.generate_jwt(&email)?);
            Ok(())
        }
    }
}

fn init_tracing(config: &AppConfig) {
    let default_filter = if is_development!() || config.api.enable_request_logging {
        "info,tower_http=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

async fn build_repositories(config: &AppConfig) -> Result<Repositories> {
    match config.api.store_backend {
        StoreBackend::Postgres => {
            let db = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to database")?;
            if config.database.run_migrations {
                db.run_migrations().await.context("failed to run migrations")?;
            }
            Ok(Repositories::postgres(db))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; nothing will be persisted");
            let store = Arc::new(MemoryStore::new());
            for email in &config.api.memory_seed_users {
                let nickname = email.split('@').next().unwrap_or(email);
                store.add_user(email, nickname).await;
                tracing::info!("Seeded user {}", email);
            }
            Ok(Repositories::memory(store))
        }
    }
}

async fn serve(config: &AppConfig) -> Result<()> {
    tracing::info!("Starting Mummoom API in {:?} mode", config.environment);

    let keys = JwtKeys::from_config(&config.security).context("JWT_SECRET must be set")?;
    let repos = build_repositories(config).await?;
    let store = repos.store.clone();
    let state = AppState::new(repos, keys);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Mummoom API listening on http://{}", bind_addr);

    axum::serve(listener, app(state, config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Store::Postgres(db) = store {
        db.close().await;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
