use crate::error::AppError;
use crate::hal::{to_resource, BookmarkCollection, BookmarkResource, LinkBuilder, RootDocument};
use crate::model::{Account, NewBookmark};
use crate::store::{AccountStore, BookmarkStore};
use std::sync::Arc;

pub struct BookmarkService {
    accounts: Arc<dyn AccountStore>,
    bookmarks: Arc<dyn BookmarkStore>,
    links: LinkBuilder,
    strict_ownership: bool,
}

impl BookmarkService {
    pub fn new(accounts: Arc<dyn AccountStore>, bookmarks: Arc<dyn BookmarkStore>, links: LinkBuilder) -> Self {
        BookmarkService {
            accounts,
            bookmarks,
            links,
            strict_ownership: false,
        }
    }

    /// When set, `read` reports bookmarks owned by another account as not found.
    pub fn with_strict_ownership(mut self, strict: bool) -> Self {
        self.strict_ownership = strict;
        self
    }

    pub fn accounts(&self) -> &dyn AccountStore {
        self.accounts.as_ref()
    }

    /// One link per known account.
    pub async fn root(&self) -> Result<RootDocument, AppError> {
        let accounts = self.accounts.find_all().await?;
        Ok(RootDocument::new(&self.links, &accounts))
    }

    pub async fn list(&self, user_id: &str) -> Result<BookmarkCollection, AppError> {
        self.validate_user(user_id).await?;
        let resources = self
            .bookmarks
            .find_by_account_username(user_id)
            .await?
            .into_iter()
            .map(|b| to_resource(&self.links, b, user_id))
            .collect();
        Ok(BookmarkCollection::new(&self.links, user_id, resources))
    }

    /// Persist a bookmark for `user_id`. Returns the resource and its self href (the creation location).
    pub async fn create(&self, user_id: &str, input: NewBookmark) -> Result<(BookmarkResource, String), AppError> {
        let account = self.validate_user(user_id).await?;
        let saved = self.bookmarks.save(&account, input).await?;
        tracing::info!(user = %user_id, bookmark_id = saved.id, "bookmark created");
        let resource = to_resource(&self.links, saved, user_id);
        let location = resource
            .self_href()
            .map(str::to_string)
            .ok_or_else(|| AppError::Assembly(format!("no self link for bookmark {}", resource.bookmark.id)))?;
        Ok((resource, location))
    }

    pub async fn read(&self, user_id: &str, bookmark_id: i64) -> Result<BookmarkResource, AppError> {
        let account = self.validate_user(user_id).await?;
        let bookmark = self
            .bookmarks
            .find_by_id(bookmark_id)
            .await?
            .filter(|b| !self.strict_ownership || b.account_id == account.id)
            .ok_or_else(|| AppError::BookmarkNotFound(bookmark_id.to_string()))?;
        Ok(to_resource(&self.links, bookmark, user_id))
    }

    async fn validate_user(&self, user_id: &str) -> Result<Account, AppError> {
        self.accounts
            .find_by_username(user_id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(user_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    /// alice owns bookmark 1 (http://x.test); bob owns nothing.
    async fn fixture() -> (Arc<MemoryStore>, BookmarkService) {
        let store = Arc::new(MemoryStore::new());
        let alice = store.create("alice", "pw").await.unwrap();
        store.create("bob", "pw").await.unwrap();
        store
            .save(
                &alice,
                NewBookmark {
                    uri: "http://x.test".into(),
                    description: "x".into(),
                },
            )
            .await
            .unwrap();
        let service = BookmarkService::new(store.clone(), store.clone(), LinkBuilder::default());
        (store, service)
    }

    #[tokio::test]
    async fn root_lists_every_account_once() {
        let (_, service) = fixture().await;
        let root = service.root().await.unwrap();
        let rels: Vec<(&str, &str)> = root.links.iter().map(|l| (l.rel.as_str(), l.href.as_str())).collect();
        assert_eq!(rels, vec![("alice", "/bookmarks/alice"), ("bob", "/bookmarks/bob")]);
    }

    #[tokio::test]
    async fn list_returns_only_the_users_bookmarks() {
        let (_, service) = fixture().await;
        let alice = service.list("alice").await.unwrap();
        assert_eq!(alice.bookmarks().len(), 1);
        assert_eq!(alice.bookmarks()[0].bookmark.uri, "http://x.test");
        assert!(service.list("bob").await.unwrap().bookmarks().is_empty());
    }

    #[tokio::test]
    async fn unknown_user_fails_every_user_scoped_operation() {
        let (store, service) = fixture().await;
        let input = NewBookmark {
            uri: "http://y.test".into(),
            description: "y".into(),
        };
        assert!(matches!(service.list("carol").await, Err(AppError::UserNotFound(u)) if u == "carol"));
        assert!(matches!(service.read("carol", 1).await, Err(AppError::UserNotFound(u)) if u == "carol"));
        assert!(matches!(service.create("carol", input).await, Err(AppError::UserNotFound(u)) if u == "carol"));
        assert_eq!(store.find_by_id(2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn unknown_bookmark_is_reported_by_id() {
        let (_, service) = fixture().await;
        let err = service.read("alice", 99).await.unwrap_err();
        assert_eq!(err.to_string(), "could not find bookmark '99'.");
    }

    #[tokio::test]
    async fn created_location_resolves_to_the_new_bookmark() {
        let (_, service) = fixture().await;
        let input = NewBookmark {
            uri: "http://y.test".into(),
            description: "y".into(),
        };
        let (created, location) = service.create("alice", input).await.unwrap();
        assert_eq!(location, "/bookmarks/alice/2");
        let fetched = service.read("alice", created.bookmark.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(service.list("alice").await.unwrap().bookmarks().len(), 2);
    }

    #[tokio::test]
    async fn read_ignores_ownership_unless_strict() {
        let (store, service) = fixture().await;
        let lenient = service.read("bob", 1).await.unwrap();
        assert_eq!(lenient.self_href(), Some("/bookmarks/bob/1"));

        let strict = BookmarkService::new(store.clone(), store, LinkBuilder::default()).with_strict_ownership(true);
        assert!(matches!(strict.read("bob", 1).await, Err(AppError::BookmarkNotFound(id)) if id == "1"));
        assert!(strict.read("alice", 1).await.is_ok());
    }
}
