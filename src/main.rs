//! MediPass Server — authentication service for the clinic platform.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use medipass_api::state::AppState;
use medipass_core::config::AppConfig;
use medipass_core::error::AppError;
use medipass_credential::jwt::TokenService;
use medipass_credential::password::{PasswordHasher, PasswordValidator};
use medipass_database::store::{IdentityStore, PgIdentityStore};
use medipass_database::{DatabasePool, migration};
use medipass_service::auth::AuthService;

#[tokio::main]
async fn main() {
    let env = std::env::var("MEDIPASS_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting MediPass v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db_pool = DatabasePool::connect(&config.database).await?;
    migration::run_migrations(db_pool.pool()).await?;

    // ── Step 2: Identity store ───────────────────────────────────
    let identity_store: Arc<dyn IdentityStore> =
        Arc::new(PgIdentityStore::new(db_pool.pool().clone()));

    // ── Step 3: Credential services ──────────────────────────────
    let token_service = Arc::new(TokenService::new(&config.auth));
    let password_hasher = Arc::new(PasswordHasher::new());
    let password_policy = Arc::new(PasswordValidator::new(&config.auth));

    // ── Step 4: Orchestrator ─────────────────────────────────────
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&identity_store),
        Arc::clone(&token_service),
        password_hasher,
        password_policy,
    ));

    // ── Step 5: Build and start HTTP server ──────────────────────
    let app_state = AppState {
        config: Arc::new(config.clone()),
        identity_store,
        token_service,
        auth_service,
    };

    let app = medipass_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("MediPass server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    db_pool.close().await;
    tracing::info!("MediPass server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
