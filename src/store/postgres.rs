//! PostgreSQL adapters for the account and bookmark tables.

use super::{AccountStore, BookmarkStore};
use crate::error::{AppError, ConfigError};
use crate::model::{Account, Bookmark, NewBookmark};
use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

type BookmarkRow = (i64, i64, String, String);

fn bookmark_from_row((id, account_id, uri, description): BookmarkRow) -> Bookmark {
    Bookmark {
        id,
        account_id,
        uri,
        description,
    }
}

/// Schema-qualified table name, e.g. `"public"."account"`.
fn qualified(schema: &str, table: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(table))
}

pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
    table: String,
}

impl PgAccountStore {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgAccountStore {
            pool,
            table: qualified(schema, "account"),
        }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_all(&self) -> Result<Vec<Account>, AppError> {
        let sql = format!("SELECT id, username FROM {} ORDER BY id", self.table);
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<(i64, String)> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|(id, username)| Account { id, username })
            .collect())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError> {
        let sql = format!("SELECT id, username FROM {} WHERE username = $1", self.table);
        tracing::debug!(sql = %sql, username = %username, "query");
        let row: Option<(i64, String)> = sqlx::query_as(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(id, username)| Account { id, username }))
    }

    async fn create(&self, username: &str, password: &str) -> Result<Account, AppError> {
        let sql = format!(
            "INSERT INTO {} (username, password) VALUES ($1, $2) RETURNING id, username",
            self.table
        );
        tracing::debug!(sql = %sql, username = %username, "query");
        let (id, username): (i64, String) = sqlx::query_as(&sql)
            .bind(username)
            .bind(password)
            .fetch_one(&self.pool)
            .await?;
        Ok(Account { id, username })
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgBookmarkStore {
    pool: PgPool,
    table: String,
    account_table: String,
}

impl PgBookmarkStore {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgBookmarkStore {
            pool,
            table: qualified(schema, "bookmark"),
            account_table: qualified(schema, "account"),
        }
    }
}

#[async_trait]
impl BookmarkStore for PgBookmarkStore {
    async fn find_by_account_username(&self, username: &str) -> Result<Vec<Bookmark>, AppError> {
        let sql = format!(
            r#"
            SELECT b.id, b.account_id, b.uri, b.description
            FROM {} b
            JOIN {} a ON a.id = b.account_id
            WHERE a.username = $1
            ORDER BY b.id
            "#,
            self.table, self.account_table
        );
        tracing::debug!(sql = %sql, username = %username, "query");
        let rows: Vec<BookmarkRow> = sqlx::query_as(&sql)
            .bind(username)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(bookmark_from_row).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Bookmark>, AppError> {
        let sql = format!(
            "SELECT id, account_id, uri, description FROM {} WHERE id = $1",
            self.table
        );
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<BookmarkRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(bookmark_from_row))
    }

    async fn save(&self, account: &Account, input: NewBookmark) -> Result<Bookmark, AppError> {
        let sql = format!(
            r#"
            INSERT INTO {} (account_id, uri, description)
            VALUES ($1, $2, $3)
            RETURNING id, account_id, uri, description
            "#,
            self.table
        );
        tracing::debug!(sql = %sql, account_id = account.id, "query");
        let row: BookmarkRow = sqlx::query_as(&sql)
            .bind(account.id)
            .bind(&input.uri)
            .bind(&input.description)
            .fetch_one(&self.pool)
            .await?;
        Ok(bookmark_from_row(row))
    }
}

/// Create the database named in `database_url` when it does not exist yet, using a
/// connection to the `postgres` maintenance database on the same server.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (maintenance, target) = maintenance_options(database_url)?;
    let Some(target) = target else {
        return Ok(());
    };
    let mut conn = maintenance.connect().await?;
    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&target)
        .fetch_one(&mut conn)
        .await?;
    if !exists {
        tracing::info!(database = %target, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&target)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options pointing at the `postgres` database, plus the target database name when it
/// needs checking (absent or already `postgres` yields `None`).
fn maintenance_options(database_url: &str) -> Result<(PgConnectOptions, Option<String>), ConfigError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|e| ConfigError::Invalid {
        key: "DATABASE_URL",
        reason: e.to_string(),
    })?;
    let target = opts
        .get_database()
        .map(str::to_string)
        .filter(|name| !name.is_empty() && name != "postgres");
    Ok((opts.database("postgres"), target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maintenance_connection_targets_postgres_database() {
        let (opts, target) =
            maintenance_options("postgres://u:p@localhost:5432/bookmarks?sslmode=disable").unwrap();
        assert_eq!(opts.get_database(), Some("postgres"));
        assert_eq!(opts.get_host(), "localhost");
        assert_eq!(opts.get_port(), 5432);
        assert_eq!(target.as_deref(), Some("bookmarks"));
    }

    #[test]
    fn maintenance_database_itself_needs_no_check() {
        let (_, target) = maintenance_options("postgres://localhost/postgres").unwrap();
        assert_eq!(target, None);
    }

    #[tokio::test]
    async fn malformed_database_url_is_a_config_error() {
        let err = ensure_database_exists("not a url").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::Invalid { key: "DATABASE_URL", .. })
        ));
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("public"), "\"public\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(qualified("app", "bookmark"), "\"app\".\"bookmark\"");
    }
}
