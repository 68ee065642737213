//! Handler for the filtered incident report.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use vigil_core::report::{tally, Tally};
use vigil_db::models::incident::Incident;
use vigil_db::models::user::User;
use vigil_db::repositories::{IncidentRepo, UserRepo};

use crate::error::AppResult;
use crate::handlers::release;
use crate::query::{AppliedFilters, ReportParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Report page payload.
///
/// `incidents` and the two tallies cover the filtered set only; the
/// vocabularies and user list are global so the filter form can offer
/// every option.
#[derive(Debug, Serialize)]
pub struct ReportView {
    pub incidents: Vec<Incident>,
    pub total_incidents: usize,
    pub severity_counts: Tally,
    pub status_counts: Tally,
    pub types: Vec<String>,
    pub severities: Vec<String>,
    pub statuses: Vec<String>,
    pub users: Vec<User>,
    pub filters: AppliedFilters,
}

/// GET /report
pub async fn incident_report(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.to_filter()?;

    let mut conn = state.db.connect().await?;
    let loaded = async {
        let incidents = IncidentRepo::report(&mut conn, &filter).await?;
        let types = IncidentRepo::distinct_types(&mut conn).await?;
        let severities = IncidentRepo::distinct_severities(&mut conn).await?;
        let statuses = IncidentRepo::distinct_statuses(&mut conn).await?;
        let users = UserRepo::list(&mut conn).await?;
        Ok::<_, sqlx::Error>((incidents, types, severities, statuses, users))
    }
    .await;
    release(conn).await;
    let (incidents, types, severities, statuses, users) = loaded?;

    let severity_counts = tally(incidents.iter().map(|i| i.severity.as_str()));
    let status_counts = tally(incidents.iter().map(|i| i.status.as_str()));

    tracing::debug!(?filter, total = incidents.len(), "Built incident report");

    Ok(Json(DataResponse {
        data: ReportView {
            total_incidents: incidents.len(),
            incidents,
            severity_counts,
            status_counts,
            types,
            severities,
            statuses,
            users,
            filters: params.applied(),
        },
    }))
}
