//! Waitline Daemon - Main Entry Point
//!
//! Composition root: wires the SQLite store, the credential hasher, the
//! notifier and the repair scheduler together and serves the JSON-RPC
//! surface on localhost.

mod telemetry;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use waitline_api_rpc::{RpcHandler, RpcServer, RpcServerConfig};
use waitline_core::application::access::SuperAdminConfig;
use waitline_core::application::{AccessService, QueueService, RepairScheduler, WaitEstimator};
use waitline_core::port::credential_hasher::Argon2Hasher;
use waitline_core::port::id_provider::UuidProvider;
use waitline_core::port::time_provider::SystemTimeProvider;
use waitline_core::port::{NoopNotifier, Notifier};
use waitline_infra_notify::{TwilioConfig, TwilioNotifier};
use waitline_infra_sqlite::{create_pool, run_migrations, SqliteQueueStore};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_DB_PATH: &str = "~/.waitline/waitline.db";
const DEFAULT_RPC_PORT: u16 = 9533;
const REPAIR_INTERVAL_HOURS: u64 = 24;

/// Tilde-expand the configured database path, falling back to the default
fn resolve_db_path(configured: Option<String>) -> String {
    let raw = configured.unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
    shellexpand::tilde(&raw).into_owned()
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging
    let log_format = std::env::var("WAITLINE_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("waitline=info"))
        .expect("Failed to create env filter");

    match log_format.as_str() {
        "json" => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            // Development: pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    info!("Waitline v{} starting...", VERSION);

    // 1.1. Initialize OpenTelemetry (optional)
    if let Err(e) = telemetry::init_telemetry() {
        tracing::warn!(error = ?e, "Failed to initialize OpenTelemetry (continuing without it)");
    }

    // 2. Load configuration
    let db_path = resolve_db_path(std::env::var("WAITLINE_DB_PATH").ok());

    let rpc_port: u16 = std::env::var("WAITLINE_RPC_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_RPC_PORT);

    info!(db_path = %db_path, "Initializing database...");

    // 3. Initialize database
    let pool = create_pool(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("DB pool creation failed: {}", e))?;
    run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    // 4. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let id_provider = Arc::new(UuidProvider);
    let hasher = Arc::new(Argon2Hasher);
    let store = Arc::new(SqliteQueueStore::new(pool.clone()));

    let notifier: Arc<dyn Notifier> = match TwilioConfig::from_env() {
        Some(config) => {
            info!("Twilio notifier configured");
            Arc::new(TwilioNotifier::new(config))
        }
        None => {
            info!("Twilio not configured, notifications disabled");
            Arc::new(NoopNotifier)
        }
    };

    let super_admin = SuperAdminConfig::from_env();
    if super_admin.is_none() {
        tracing::warn!("Super admin credentials not configured, admin surface is locked out");
    }

    let queue_service = Arc::new(QueueService::new(
        store.clone(),
        id_provider.clone(),
        time_provider.clone(),
        notifier,
    ));
    let access_service = Arc::new(AccessService::new(
        store.clone(),
        hasher,
        id_provider,
        time_provider.clone(),
        super_admin,
    ));
    let estimator = Arc::new(WaitEstimator::new(store.clone()));

    // 5. Start JSON-RPC server
    info!("Starting JSON-RPC server...");
    let rpc_config = RpcServerConfig {
        port: rpc_port,
        ..Default::default()
    };
    let handler = RpcHandler::new(
        queue_service,
        access_service,
        store.clone(),
        store.clone(),
        estimator,
    );
    let rpc_handle = RpcServer::new(rpc_config, handler)
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    // 6. Start repair scheduler (periodic counter reconciliation)
    info!("Starting repair scheduler...");
    let scheduler = RepairScheduler::new(store, time_provider, REPAIR_INTERVAL_HOURS);
    tokio::spawn(async move {
        scheduler.run().await;
    });

    info!("System ready. Serving queues.");
    info!("Press Ctrl+C to shutdown");

    // 7. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;

    info!("Shutdown complete.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_db_path_expands_user_supplied_tilde() {
        let resolved = resolve_db_path(Some("~/queues/waitline.db".to_string()));
        assert!(!resolved.starts_with('~'));
        assert!(resolved.ends_with("/queues/waitline.db"));
    }

    #[test]
    fn test_resolve_db_path_leaves_absolute_paths_alone() {
        let resolved = resolve_db_path(Some("/var/lib/waitline.db".to_string()));
        assert_eq!(resolved, "/var/lib/waitline.db");
    }

    #[test]
    fn test_resolve_db_path_expands_default() {
        assert!(!resolve_db_path(None).starts_with('~'));
    }
}
