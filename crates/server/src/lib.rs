//! Estate server library.
//!
//! HTTP controllers for properties, appointments, payment records and
//! accounts, backed by a document store and a key-value store.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod infra;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{ServerConfig, StoreBackend};
use crate::infra::Database;
use crate::routes::create_router;
use crate::state::AppState;
use crate::store::{
    DocumentStore, KeyValueStore, MemoryDocumentStore, RedisBackend, SeaDocumentStore,
};

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Connect the configured stores and wire the application state.
pub async fn build_state(config: ServerConfig) -> Result<AppState, Box<dyn std::error::Error>> {
    if config.session.secret.len() < domain::MIN_SESSION_SECRET_LENGTH {
        return Err(format!(
            "SESSION_SECRET must be at least {} characters",
            domain::MIN_SESSION_SECRET_LENGTH
        )
        .into());
    }

    let (store, kv): (Arc<dyn DocumentStore>, KeyValueStore) = match config.store_backend {
        StoreBackend::Postgres => {
            let db = Database::connect(&config.database).await?;
            let redis = RedisBackend::connect(&config.cache.url).await?;
            (
                Arc::new(SeaDocumentStore::new(db.get_connection())),
                KeyValueStore::new(Arc::new(redis)),
            )
        }
        StoreBackend::Memory => {
            warn!("Using in-memory stores; data is lost on exit");
            (Arc::new(MemoryDocumentStore::new()), KeyValueStore::in_memory())
        }
    };

    Ok(AppState::new(store, kv, config))
}

/// Run the HTTP server on the given address.
pub async fn run_server(
    host: &str,
    port: u16,
    config: ServerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(config).await?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Estate server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    action: MigrateAction,
    config: &ServerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}
