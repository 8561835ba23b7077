//! Server configuration from environment variables (after `dotenvy`).

use crate::error::ConfigError;
use crate::migration::DEFAULT_SEED_USERS;
use std::collections::HashMap;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SCHEMA: &str = "public";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// `DATABASE_URL`. When unset the server runs on the in-memory store.
    pub database_url: Option<String>,
    /// `BIND_ADDR`
    pub bind_addr: String,
    /// `PUBLIC_BASE_URL`: origin prefixed to every link href. Empty means root-relative links.
    pub public_base_url: String,
    /// `BOOKMARKS_SCHEMA`
    pub schema: String,
    /// `SEED_USERS`: comma-separated. Empty disables seeding.
    pub seed_users: Vec<String>,
    /// `STRICT_OWNERSHIP`
    pub strict_ownership: bool,
    /// `DB_MAX_CONNECTIONS`
    pub max_connections: u32,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let schema = get("BOOKMARKS_SCHEMA").unwrap_or(DEFAULT_SCHEMA).to_string();
        if !is_identifier(&schema) {
            return Err(ConfigError::SchemaName(schema));
        }

        let seed_users = match vars.get("SEED_USERS") {
            Some(list) => list
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => DEFAULT_SEED_USERS.iter().map(|s| s.to_string()).collect(),
        };

        let strict_ownership = match get("STRICT_OWNERSHIP") {
            None => false,
            Some(v) if v.eq_ignore_ascii_case("true") => true,
            Some(v) if v.eq_ignore_ascii_case("false") => false,
            Some(v) => {
                return Err(ConfigError::Invalid {
                    key: "STRICT_OWNERSHIP",
                    reason: format!("expected true or false, got '{}'", v),
                })
            }
        };

        let max_connections = match get("DB_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(v) => v.parse::<u32>().ok().filter(|n| *n > 0).ok_or_else(|| ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                reason: format!("expected a positive integer, got '{}'", v),
            })?,
        };

        Ok(ServerConfig {
            database_url: get("DATABASE_URL").map(str::to_string),
            bind_addr: get("BIND_ADDR").unwrap_or(DEFAULT_BIND_ADDR).to_string(),
            public_base_url: get("PUBLIC_BASE_URL").unwrap_or("").to_string(),
            schema,
            seed_users,
            strict_ownership,
            max_connections,
        })
    }
}

/// Plain SQL identifier: letter or underscore, then letters, digits, underscores.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
