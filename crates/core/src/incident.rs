//! Incident form-field validation.
//!
//! Browsers submit every form field as text. These helpers turn the raw
//! values into typed ones and decide which absences are errors: `type`,
//! `severity`, `status` and `date` are required, an empty `user_id` means
//! unassigned. `description` is stored exactly as submitted.

use crate::error::CoreError;
use crate::types::{DbId, IncidentDate};

pub const FIELD_TYPE: &str = "type";
pub const FIELD_SEVERITY: &str = "severity";
pub const FIELD_STATUS: &str = "status";
pub const FIELD_DATE: &str = "date";
pub const FIELD_USER_ID: &str = "user_id";
pub const FIELD_START_DATE: &str = "start_date";
pub const FIELD_END_DATE: &str = "end_date";

/// Wire format of incident dates (`2024-10-12`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Return the value of a required text field, unchanged.
///
/// Absent and blank values both fail with [`CoreError::MissingField`].
pub fn require_field(field: &'static str, value: Option<&str>) -> Result<String, CoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(CoreError::MissingField(field)),
    }
}

/// Optional report filter text: empty input becomes `None`, meaning the
/// filter is omitted rather than "match empty".
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(field: &'static str, value: &str) -> Result<IncidentDate, CoreError> {
    IncidentDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        CoreError::Validation(format!(
            "{field} must be a date in YYYY-MM-DD format, got '{value}'"
        ))
    })
}

/// Parse the required incident date.
pub fn require_date(field: &'static str, value: Option<&str>) -> Result<IncidentDate, CoreError> {
    let raw = require_field(field, value)?;
    parse_date(field, &raw)
}

/// Parse an optional date; empty or absent means "no value".
pub fn parse_optional_date(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<IncidentDate>, CoreError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => parse_date(field, v).map(Some),
        _ => Ok(None),
    }
}

/// Parse an optional user reference; empty or absent means unassigned.
pub fn parse_optional_user_id(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<DbId>, CoreError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.parse::<DbId>().map(Some).map_err(|_| {
            CoreError::Validation(format!("{field} must be an integer id, got '{v}'"))
        }),
        _ => Ok(None),
    }
}
