//! Schema bootstrap and demonstration seed data.
//!
//! Creates the `users` and `incidents` tables with their indexes and
//! inserts fixed demo rows by explicit id. Every statement is idempotent,
//! so running the bootstrap against an initialised database changes
//! nothing. Table and column names are the on-disk contract shared with
//! existing deployments.

use sqlx::postgres::PgConnection;
use sqlx::Connection;

/// DDL statements, applied in order.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        role TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS incidents (
        id SERIAL PRIMARY KEY,
        type TEXT NOT NULL,
        severity TEXT NOT NULL,
        status TEXT NOT NULL,
        date DATE NOT NULL,
        description TEXT,
        user_id INTEGER,
        FOREIGN KEY (user_id) REFERENCES users(id)
    )",
    "CREATE INDEX IF NOT EXISTS idx_incidents_date ON incidents(date)",
    "CREATE INDEX IF NOT EXISTS idx_incidents_severity ON incidents(severity)",
    "CREATE INDEX IF NOT EXISTS idx_incidents_user_id ON incidents(user_id)",
];

/// Seed rows. Existing ids are left untouched.
const SEED: &[&str] = &[
    "INSERT INTO users (id, name, email, role)
     VALUES
        (1, 'John Doe', 'john@example.com', 'Security Analyst'),
        (2, 'Marcelo Moreno', 'marcelo@example.com', 'CISO'),
        (3, 'Juan Carlos', 'juan@example.com', 'Security Engineer')
     ON CONFLICT (id) DO NOTHING",
    "INSERT INTO incidents (id, type, severity, status, date, description, user_id)
     VALUES
        (1, 'Phishing', 'High', 'Open', '2024-10-12', 'User clicked suspicious link', 1),
        (2, 'Malware', 'Critical', 'In Progress', '2024-10-15', 'Ransomware detected on workstation', 2),
        (3, 'Data Breach', 'High', 'Closed', '2024-10-10', 'Unauthorized access to database', NULL)
     ON CONFLICT (id) DO NOTHING",
];

/// Explicit-id inserts do not advance SERIAL sequences; move them past the
/// seeded ids so generated ids do not collide.
const SYNC_SEQUENCES: &[&str] = &[
    "SELECT setval(pg_get_serial_sequence('users', 'id'), MAX(id))
     FROM users HAVING MAX(id) IS NOT NULL",
    "SELECT setval(pg_get_serial_sequence('incidents', 'id'), MAX(id))
     FROM incidents HAVING MAX(id) IS NOT NULL",
];

/// Number of users inserted by the seed.
pub const SEED_USER_COUNT: usize = 3;

/// Number of incidents inserted by the seed.
pub const SEED_INCIDENT_COUNT: usize = 3;

/// Create the schema and seed demo data in a single transaction.
///
/// On failure the transaction is rolled back and the error returned; the
/// database is left as it was before the call.
pub async fn bootstrap(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    let mut tx = conn.begin().await?;

    let result = apply_statements(&mut tx).await;

    match result {
        Ok(()) => {
            tx.commit().await?;
            tracing::info!(
                tables = 2,
                indexes = 3,
                seed_users = SEED_USER_COUNT,
                seed_incidents = SEED_INCIDENT_COUNT,
                "Schema bootstrap committed",
            );
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "Schema bootstrap failed, rolling back");
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "Rollback failed");
            }
            Err(err)
        }
    }
}

async fn apply_statements(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    for statement in SCHEMA.iter().chain(SEED).chain(SYNC_SEQUENCES) {
        sqlx::query(*statement).execute(&mut *conn).await?;
    }
    Ok(())
}
