//! Database layer: connection provider, schema bootstrap, models and
//! repositories for the `users` and `incidents` tables.

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;

pub mod bootstrap;
pub mod models;
pub mod repositories;

/// Opens a fresh database connection for every unit of work.
///
/// There is no pool: each request connects, runs its statements and closes
/// the connection again. The parsed options are immutable and cheap to
/// clone, so the provider can live in shared application state.
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    options: PgConnectOptions,
}

impl ConnectionProvider {
    /// Build a provider from already-parsed connect options.
    pub fn new(options: PgConnectOptions) -> Self {
        Self { options }
    }

    /// Parse a `postgres://` connection string.
    pub fn from_url(database_url: &str) -> Result<Self, sqlx::Error> {
        PgConnectOptions::from_str(database_url).map(Self::new)
    }

    /// Open a new connection. The caller owns it and should `close()` it.
    pub async fn connect(&self) -> Result<PgConnection, sqlx::Error> {
        PgConnection::connect_with(&self.options).await
    }
}

/// Verify the database is reachable.
pub async fn health_check(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(conn).await?;
    Ok(())
}
