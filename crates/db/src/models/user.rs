use serde::Serialize;
use sqlx::FromRow;
use vigil_core::types::DbId;

/// A row from the `users` table. Seeded by the bootstrapper, read-only here.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
}
