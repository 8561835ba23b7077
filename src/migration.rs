//! Create the account and bookmark tables, and load the startup seed data.

use crate::error::AppError;
use crate::model::NewBookmark;
use crate::store::{quote_ident, AccountStore, BookmarkStore};
use sqlx::PgPool;

/// Usernames seeded when `SEED_USERS` is not set.
pub const DEFAULT_SEED_USERS: &[&str] = &[
    "jhoeller", "dsyer", "pwebb", "ogierke", "rwinch", "mfisher", "mpollack", "jlong",
];

const SEED_PASSWORD: &str = "password";
const SEED_DESCRIPTION: &str = "A description";

/// Idempotent DDL: schema, `account`, `bookmark` (FK to account) and the owner index.
pub async fn apply_migrations(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    let schema_q = quote_ident(schema);
    let statements = [
        format!("CREATE SCHEMA IF NOT EXISTS {}", schema_q),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {}."account" (
                id BIGSERIAL PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL
            )
            "#,
            schema_q
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {0}."bookmark" (
                id BIGSERIAL PRIMARY KEY,
                account_id BIGINT NOT NULL REFERENCES {0}."account" (id),
                uri TEXT NOT NULL,
                description TEXT NOT NULL
            )
            "#,
            schema_q
        ),
        format!(
            r#"CREATE INDEX IF NOT EXISTS "bookmark_account_id_idx" ON {}."bookmark" (account_id)"#,
            schema_q
        ),
    ];
    for sql in &statements {
        tracing::debug!(sql = %sql, "migration");
        sqlx::query(sql).execute(pool).await?;
    }
    tracing::info!(schema = %schema, "schema ready");
    Ok(())
}

/// Create each missing account with two sample bookmarks. Existing usernames are left untouched.
/// Returns the number of accounts created.
pub async fn seed(
    accounts: &dyn AccountStore,
    bookmarks: &dyn BookmarkStore,
    usernames: &[String],
) -> Result<usize, AppError> {
    let mut created = 0;
    for username in usernames {
        if accounts.find_by_username(username).await?.is_some() {
            tracing::debug!(username = %username, "seed account exists, skipping");
            continue;
        }
        let account = accounts.create(username, SEED_PASSWORD).await?;
        for n in 1..=2 {
            let input = NewBookmark {
                uri: format!("http://bookmark.com/{}/{}", n, username),
                description: SEED_DESCRIPTION.to_string(),
            };
            bookmarks.save(&account, input).await?;
        }
        created += 1;
    }
    if created > 0 {
        tracing::info!(accounts = created, "seeded accounts");
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn seeds_two_bookmarks_per_new_account() {
        let store = MemoryStore::new();
        let users = vec!["jlong".to_string(), "dsyer".to_string()];
        assert_eq!(seed(&store, &store, &users).await.unwrap(), 2);

        let jlong = store.find_by_account_username("jlong").await.unwrap();
        let uris: Vec<&str> = jlong.iter().map(|b| b.uri.as_str()).collect();
        assert_eq!(uris, vec!["http://bookmark.com/1/jlong", "http://bookmark.com/2/jlong"]);
        assert!(jlong.iter().all(|b| b.description == "A description"));
    }

    #[tokio::test]
    async fn reseeding_is_a_no_op() {
        let store = MemoryStore::new();
        let users = vec!["jlong".to_string()];
        seed(&store, &store, &users).await.unwrap();
        assert_eq!(seed(&store, &store, &users).await.unwrap(), 0);
        assert_eq!(store.find_all().await.unwrap().len(), 1);
        assert_eq!(store.find_by_account_username("jlong").await.unwrap().len(), 2);
    }
}
