//! Bookmark server: reads config from env, prepares the store, seeds accounts, mounts common and bookmark routes.
//!
//! Without `DATABASE_URL` the server runs on the in-memory store.

use bookmarks_hal::{
    apply_migrations, bookmark_routes, common_routes_with_ready, ensure_database_exists, seed, AccountStore, AppState,
    BookmarkService, BookmarkStore, LinkBuilder, MemoryStore, PgAccountStore, PgBookmarkStore, ServerConfig,
};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bookmarks_hal=info,tower_http=info")),
        )
        .init();

    let cfg = ServerConfig::from_env()?;

    let (accounts, bookmarks): (Arc<dyn AccountStore>, Arc<dyn BookmarkStore>) = match &cfg.database_url {
        Some(database_url) => {
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(cfg.max_connections)
                .connect(database_url)
                .await?;
            apply_migrations(&pool, &cfg.schema).await?;
            let accounts: Arc<dyn AccountStore> = Arc::new(PgAccountStore::new(pool.clone(), &cfg.schema));
            let bookmarks: Arc<dyn BookmarkStore> = Arc::new(PgBookmarkStore::new(pool, &cfg.schema));
            (accounts, bookmarks)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            let store = Arc::new(MemoryStore::new());
            let accounts: Arc<dyn AccountStore> = store.clone();
            let bookmarks: Arc<dyn BookmarkStore> = store;
            (accounts, bookmarks)
        }
    };

    seed(accounts.as_ref(), bookmarks.as_ref(), &cfg.seed_users).await?;

    let service = BookmarkService::new(accounts, bookmarks, LinkBuilder::new(cfg.public_base_url.clone()))
        .with_strict_ownership(cfg.strict_ownership);
    let state = AppState::new(service);

    let app = Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(bookmark_routes(state));

    let listener = TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("ctrl+c received, shutting down");
        })
        .await?;
    Ok(())
}
