//! Incident models and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vigil_core::types::{DbId, IncidentDate};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `incidents` table.
///
/// `type` is a Rust keyword, so the column is held in `incident_type` and
/// renamed on both the SQL and JSON sides.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Incident {
    pub id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub incident_type: String,
    pub severity: String,
    pub status: String,
    pub date: IncidentDate,
    pub description: Option<String>,
    pub user_id: Option<DbId>,
}

/// An incident joined with the display name of its assignee, if any.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct IncidentWithAssignee {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub incident: Incident,
    pub user_name: Option<String>,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Validated field set for inserting an incident or overwriting one.
///
/// Updates replace every mutable column, so create and update share this
/// shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentInput {
    pub incident_type: String,
    pub severity: String,
    pub status: String,
    pub date: IncidentDate,
    pub description: Option<String>,
    pub user_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Filters for the incident report. `None` means the filter is not applied.
///
/// Dates are inclusive bounds; every other filter is an exact match. All
/// supplied filters are AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub start_date: Option<IncidentDate>,
    pub end_date: Option<IncidentDate>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub incident_type: Option<String>,
    pub user_id: Option<DbId>,
}
