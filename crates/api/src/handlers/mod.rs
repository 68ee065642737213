//! Request handlers.
//!
//! Each handler opens one connection through the state's
//! [`ConnectionProvider`](vigil_db::ConnectionProvider), runs its
//! repository calls on it, and closes it before building the response,
//! whether or not those calls succeeded.

pub mod home;
pub mod incident;
pub mod report;

use sqlx::postgres::PgConnection;
use sqlx::Connection;

/// Path every incident write redirects back to.
pub const INCIDENTS_PATH: &str = "/incidents";

/// Close a request's connection.
///
/// Any transaction is already committed or rolled back at this point, so a
/// failed close is logged rather than turned into an error response.
pub async fn release(conn: PgConnection) {
    if let Err(err) = conn.close().await {
        tracing::warn!(error = %err, "Failed to close database connection");
    }
}
