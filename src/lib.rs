//! Bookmarks HAL: per-user bookmark collections over REST, decorated with HAL links.

pub mod config;
pub mod doc;
pub mod error;
pub mod hal;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError, ErrorBody};
pub use hal::{BookmarkCollection, BookmarkResource, Link, LinkBuilder, Links, RootDocument};
pub use migration::{apply_migrations, seed};
pub use model::{Account, Bookmark, NewBookmark};
pub use routes::{bookmark_routes, common_routes_with_ready};
pub use service::BookmarkService;
pub use state::AppState;
pub use store::{
    ensure_database_exists, AccountStore, BookmarkStore, MemoryStore, PgAccountStore, PgBookmarkStore,
};
