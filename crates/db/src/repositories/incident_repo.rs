//! Repository for the `incidents` table.
//!
//! Every write runs in its own transaction on the caller's connection. On a
//! database error the transaction is rolled back and the error is logged
//! before it is returned, so nothing is ever partially committed.

use sqlx::postgres::{PgArguments, PgConnection};
use sqlx::query::QueryAs;
use sqlx::{Connection, Postgres, Transaction};
use vigil_core::types::{DbId, IncidentDate};

use crate::models::incident::{Incident, IncidentInput, IncidentWithAssignee, ReportFilter};

/// Column list for `incidents` queries.
const COLUMNS: &str = "id, type, severity, status, date, description, user_id";

/// Provides data access for incidents.
pub struct IncidentRepo;

impl IncidentRepo {
    /// List all incidents, most recent first, with the assignee's name.
    pub async fn list_with_assignee(
        conn: &mut PgConnection,
    ) -> Result<Vec<IncidentWithAssignee>, sqlx::Error> {
        sqlx::query_as::<_, IncidentWithAssignee>(
            "SELECT i.id, i.type, i.severity, i.status, i.date, i.description, i.user_id, \
                    u.name AS user_name \
             FROM incidents i \
             LEFT JOIN users u ON i.user_id = u.id \
             ORDER BY i.date DESC, i.id DESC",
        )
        .fetch_all(conn)
        .await
    }

    /// Find an incident by id. Returns `None` if it does not exist.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Incident>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM incidents WHERE id = $1");
        sqlx::query_as::<_, Incident>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Insert a new incident and return the stored row.
    pub async fn create(
        conn: &mut PgConnection,
        input: &IncidentInput,
    ) -> Result<Incident, sqlx::Error> {
        let mut tx = conn.begin().await?;

        let query = format!(
            "INSERT INTO incidents (type, severity, status, date, description, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let result = sqlx::query_as::<_, Incident>(&query)
            .bind(&input.incident_type)
            .bind(&input.severity)
            .bind(&input.status)
            .bind(input.date)
            .bind(&input.description)
            .bind(input.user_id)
            .fetch_one(&mut *tx)
            .await;

        finish(tx, result, "create").await
    }

    /// Overwrite every mutable column of an incident.
    ///
    /// Last write wins; there is no version check. Returns `true` if a row
    /// was updated. An unknown id is not an error.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &IncidentInput,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = conn.begin().await?;

        let result = sqlx::query(
            "UPDATE incidents SET \
                 type = $2, severity = $3, status = $4, \
                 date = $5, description = $6, user_id = $7 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.incident_type)
        .bind(&input.severity)
        .bind(&input.status)
        .bind(input.date)
        .bind(&input.description)
        .bind(input.user_id)
        .execute(&mut *tx)
        .await
        .map(|done| done.rows_affected() > 0);

        finish(tx, result, "update").await
    }

    /// Delete an incident by id.
    ///
    /// Returns `true` if a row was deleted. An unknown id is not an error.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = conn.begin().await?;

        let result = sqlx::query("DELETE FROM incidents WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map(|done| done.rows_affected() > 0);

        finish(tx, result, "delete").await
    }

    /// Incidents matching every supplied filter, most recent first.
    pub async fn report(
        conn: &mut PgConnection,
        filter: &ReportFilter,
    ) -> Result<Vec<Incident>, sqlx::Error> {
        let (where_clause, bind_values) = build_report_filter(filter);

        let query = format!(
            "SELECT {COLUMNS} FROM incidents {where_clause} \
             ORDER BY date DESC, id DESC"
        );

        bind_report_values(sqlx::query_as::<_, Incident>(&query), &bind_values)
            .fetch_all(conn)
            .await
    }

    /// Distinct severities currently stored, for filter and form controls.
    pub async fn distinct_severities(conn: &mut PgConnection) -> Result<Vec<String>, sqlx::Error> {
        distinct_values(conn, "severity").await
    }

    /// Distinct statuses currently stored.
    pub async fn distinct_statuses(conn: &mut PgConnection) -> Result<Vec<String>, sqlx::Error> {
        distinct_values(conn, "status").await
    }

    /// Distinct incident types currently stored.
    pub async fn distinct_types(conn: &mut PgConnection) -> Result<Vec<String>, sqlx::Error> {
        distinct_values(conn, "type").await
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Commit on success; roll back and log on failure.
async fn finish<T>(
    tx: Transaction<'_, Postgres>,
    result: Result<T, sqlx::Error>,
    action: &'static str,
) -> Result<T, sqlx::Error> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            tracing::error!(error = %err, action, "Incident write failed, rolling back");
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, action, "Rollback failed");
            }
            Err(err)
        }
    }
}

/// `SELECT DISTINCT` over one of the fixed vocabulary columns.
async fn distinct_values(
    conn: &mut PgConnection,
    column: &'static str,
) -> Result<Vec<String>, sqlx::Error> {
    let query = format!("SELECT DISTINCT {column} FROM incidents ORDER BY {column}");
    sqlx::query_scalar::<_, String>(&query).fetch_all(conn).await
}

/// Typed bind value for the dynamically-built report query.
#[derive(Debug, Clone, PartialEq)]
enum BindValue {
    Date(IncidentDate),
    Text(String),
    Int(DbId),
}

/// Build the WHERE clause and bind values for a report filter.
///
/// Only supplied filters contribute a condition; with no filters the
/// clause is empty and every incident matches.
fn build_report_filter(filter: &ReportFilter) -> (String, Vec<BindValue>) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_values: Vec<BindValue> = Vec::new();

    let mut push = |condition: &str, value: BindValue| {
        bind_values.push(value);
        conditions.push(format!("{condition} ${}", bind_values.len()));
    };

    if let Some(start) = filter.start_date {
        push("date >=", BindValue::Date(start));
    }
    if let Some(end) = filter.end_date {
        push("date <=", BindValue::Date(end));
    }
    if let Some(ref severity) = filter.severity {
        push("severity =", BindValue::Text(severity.clone()));
    }
    if let Some(ref status) = filter.status {
        push("status =", BindValue::Text(status.clone()));
    }
    if let Some(ref incident_type) = filter.incident_type {
        push("type =", BindValue::Text(incident_type.clone()));
    }
    if let Some(user_id) = filter.user_id {
        push("user_id =", BindValue::Int(user_id));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`, in order.
fn bind_report_values<'q, O>(
    mut q: QueryAs<'q, Postgres, O, PgArguments>,
    bind_values: &'q [BindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Date(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Int(v) => q = q.bind(*v),
        }
    }
    q
}
