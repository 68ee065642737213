//! Repository for the `users` table.

use sqlx::postgres::PgConnection;

use crate::models::user::User;

/// Provides read access to users. Users are only ever created by the seed.
pub struct UserRepo;

impl UserRepo {
    /// List all users ordered by id.
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT id, name, email, role FROM users ORDER BY id")
            .fetch_all(conn)
            .await
    }
}
