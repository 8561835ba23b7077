//! In-process store implementing both capabilities. Ids are assigned from 1 in insertion order.

use super::{AccountStore, BookmarkStore};
use crate::error::AppError;
use crate::model::{Account, Bookmark, NewBookmark};
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    accounts: Vec<Account>,
    bookmarks: Vec<Bookmark>,
}

/// Account and bookmark tables held in memory. Credentials are not kept.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Account>, AppError> {
        Ok(self.tables.read().await.accounts.clone())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.accounts.iter().find(|a| a.username == username).cloned())
    }

    async fn create(&self, username: &str, _password: &str) -> Result<Account, AppError> {
        let mut tables = self.tables.write().await;
        if tables.accounts.iter().any(|a| a.username == username) {
            return Err(AppError::Store(format!("duplicate username: {}", username)));
        }
        let account = Account {
            id: tables.accounts.len() as i64 + 1,
            username: username.to_string(),
        };
        tables.accounts.push(account.clone());
        Ok(account)
    }
}

#[async_trait]
impl BookmarkStore for MemoryStore {
    async fn find_by_account_username(&self, username: &str) -> Result<Vec<Bookmark>, AppError> {
        let tables = self.tables.read().await;
        let Some(owner) = tables.accounts.iter().find(|a| a.username == username) else {
            return Ok(Vec::new());
        };
        Ok(tables
            .bookmarks
            .iter()
            .filter(|b| b.account_id == owner.id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Bookmark>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.bookmarks.iter().find(|b| b.id == id).cloned())
    }

    async fn save(&self, account: &Account, input: NewBookmark) -> Result<Bookmark, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.accounts.iter().any(|a| a.id == account.id) {
            return Err(AppError::Store(format!("unknown account id: {}", account.id)));
        }
        let bookmark = Bookmark {
            id: tables.bookmarks.len() as i64 + 1,
            account_id: account.id,
            uri: input.uri,
            description: input.description,
        };
        tables.bookmarks.push(bookmark.clone());
        Ok(bookmark)
    }
}
