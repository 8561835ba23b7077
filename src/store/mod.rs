//! Store capabilities consumed by the bookmark service, plus the PostgreSQL and in-memory adapters.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, quote_ident, PgAccountStore, PgBookmarkStore};

use crate::error::AppError;
use crate::model::{Account, Bookmark, NewBookmark};
use async_trait::async_trait;

/// Account table access.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Account>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError>;

    /// Insert a new account. Only used for seeding; the HTTP surface never creates accounts.
    async fn create(&self, username: &str, password: &str) -> Result<Account, AppError>;

    /// Liveness check for `/ready`.
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Bookmark table access.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// All bookmarks owned by `username`, in store order.
    async fn find_by_account_username(&self, username: &str) -> Result<Vec<Bookmark>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Bookmark>, AppError>;

    /// Persist a new bookmark owned by `account` and return it with its assigned id.
    async fn save(&self, account: &Account, input: NewBookmark) -> Result<Bookmark, AppError>;
}
