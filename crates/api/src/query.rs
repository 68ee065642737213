//! Query parameter types for the report endpoint.

use serde::{Deserialize, Serialize};
use vigil_core::error::CoreError;
use vigil_core::incident::{
    optional_text, parse_optional_date, parse_optional_user_id, FIELD_END_DATE, FIELD_START_DATE,
    FIELD_USER_ID,
};
use vigil_db::models::incident::ReportFilter;

/// Raw report filters (`?start_date=&end_date=&severity=&status=&type=&user_id=`).
///
/// Every parameter is optional and an empty value means "not filtered".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub incident_type: Option<String>,
    pub user_id: Option<String>,
}

/// The filter values as submitted, echoed back so the form can be refilled.
#[derive(Debug, Clone, Serialize)]
pub struct AppliedFilters {
    pub start_date: String,
    pub end_date: String,
    pub severity: String,
    pub status: String,
    #[serde(rename = "type")]
    pub incident_type: String,
    pub user_id: String,
}

impl ReportParams {
    /// Convert to a typed filter, dropping empty values.
    pub fn to_filter(&self) -> Result<ReportFilter, CoreError> {
        Ok(ReportFilter {
            start_date: parse_optional_date(FIELD_START_DATE, self.start_date.as_deref())?,
            end_date: parse_optional_date(FIELD_END_DATE, self.end_date.as_deref())?,
            severity: optional_text(self.severity.as_deref()),
            status: optional_text(self.status.as_deref()),
            incident_type: optional_text(self.incident_type.as_deref()),
            user_id: parse_optional_user_id(FIELD_USER_ID, self.user_id.as_deref())?,
        })
    }

    /// Submitted values verbatim; absent parameters echo as `""`.
    pub fn applied(&self) -> AppliedFilters {
        let echo = |value: &Option<String>| value.clone().unwrap_or_default();
        AppliedFilters {
            start_date: echo(&self.start_date),
            end_date: echo(&self.end_date),
            severity: echo(&self.severity),
            status: echo(&self.status),
            incident_type: echo(&self.incident_type),
            user_id: echo(&self.user_id),
        }
    }
}
