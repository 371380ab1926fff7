use std::net::SocketAddr;

use anyhow::{Context, Result};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind_addr = lookup("STUDENTS_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("STUDENTS_BIND_ADDR must be a valid host:port")?;

        let database_url = lookup("STUDENTS_DATABASE_URL").filter(|url| !url.trim().is_empty());

        let db_max_connections = match lookup("STUDENTS_DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .context("STUDENTS_DB_MAX_CONNECTIONS must be u32")?,
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        Ok(Self {
            bind_addr,
            database_url,
            db_max_connections,
        })
    }
}
