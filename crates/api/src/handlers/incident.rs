//! Handlers for incident listing, creation, editing and deletion.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use vigil_core::error::CoreError;
use vigil_core::incident::{
    parse_optional_user_id, require_date, require_field, FIELD_DATE,
    FIELD_SEVERITY, FIELD_STATUS, FIELD_TYPE, FIELD_USER_ID,
};
use vigil_core::types::DbId;
use vigil_db::models::incident::{Incident, IncidentInput, IncidentWithAssignee};
use vigil_db::models::user::User;
use vigil_db::repositories::{IncidentRepo, UserRepo};

use crate::error::AppResult;
use crate::handlers::{release, INCIDENTS_PATH};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Form input
// ---------------------------------------------------------------------------

/// Urlencoded body of the create and update forms.
///
/// Fields are kept optional here so a missing one surfaces as a
/// `MISSING_FIELD` error naming it, not as a generic extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncidentForm {
    #[serde(rename = "type")]
    pub incident_type: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub user_id: Option<String>,
}

impl IncidentForm {
    /// Validate the submitted fields.
    ///
    /// `type`, `severity`, `status` and `date` are required. An empty
    /// `user_id` is stored as NULL; `description` is kept verbatim, so only
    /// an absent one is NULL.
    pub fn into_input(self) -> Result<IncidentInput, CoreError> {
        Ok(IncidentInput {
            incident_type: require_field(FIELD_TYPE, self.incident_type.as_deref())?,
            severity: require_field(FIELD_SEVERITY, self.severity.as_deref())?,
            status: require_field(FIELD_STATUS, self.status.as_deref())?,
            date: require_date(FIELD_DATE, self.date.as_deref())?,
            description: self.description,
            user_id: parse_optional_user_id(FIELD_USER_ID, self.user_id.as_deref())?,
        })
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Incident list page: all incidents plus the controls' option lists.
#[derive(Debug, Serialize)]
pub struct IncidentListView {
    pub incidents: Vec<IncidentWithAssignee>,
    pub severities: Vec<String>,
    pub users: Vec<User>,
}

/// Edit form. `incident` is `null` when the id does not exist.
#[derive(Debug, Serialize)]
pub struct IncidentFormView {
    pub incident: Option<Incident>,
    pub severities: Vec<String>,
    pub users: Vec<User>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /incidents
pub async fn list_incidents(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.connect().await?;
    let loaded = async {
        let incidents = IncidentRepo::list_with_assignee(&mut conn).await?;
        let severities = IncidentRepo::distinct_severities(&mut conn).await?;
        let users = UserRepo::list(&mut conn).await?;
        Ok::<_, sqlx::Error>((incidents, severities, users))
    }
    .await;
    release(conn).await;
    let (incidents, severities, users) = loaded?;

    tracing::debug!(count = incidents.len(), "Listed incidents");

    Ok(Json(DataResponse {
        data: IncidentListView {
            incidents,
            severities,
            users,
        },
    }))
}

/// POST /incidents/create
pub async fn create_incident(
    State(state): State<AppState>,
    Form(form): Form<IncidentForm>,
) -> AppResult<Redirect> {
    let input = form.into_input()?;

    let mut conn = state.db.connect().await?;
    let created = IncidentRepo::create(&mut conn, &input).await;
    release(conn).await;
    let incident = created?;

    tracing::info!(
        incident_id = incident.id,
        severity = %incident.severity,
        status = %incident.status,
        "Incident created",
    );

    Ok(Redirect::to(INCIDENTS_PATH))
}

/// GET /incidents/update/{id}
///
/// An unknown id renders the form with no incident rather than failing.
pub async fn edit_incident_form(
    State(state): State<AppState>,
    Path(incident_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.connect().await?;
    let loaded = async {
        let incident = IncidentRepo::find_by_id(&mut conn, incident_id).await?;
        let severities = IncidentRepo::distinct_severities(&mut conn).await?;
        let users = UserRepo::list(&mut conn).await?;
        Ok::<_, sqlx::Error>((incident, severities, users))
    }
    .await;
    release(conn).await;
    let (incident, severities, users) = loaded?;

    if incident.is_none() {
        tracing::debug!(incident_id, "Edit form requested for unknown incident");
    }

    Ok(Json(DataResponse {
        data: IncidentFormView {
            incident,
            severities,
            users,
        },
    }))
}

/// POST /incidents/update/{id}
///
/// Overwrites every field. An unknown id is a silent no-op.
pub async fn update_incident(
    State(state): State<AppState>,
    Path(incident_id): Path<DbId>,
    Form(form): Form<IncidentForm>,
) -> AppResult<Redirect> {
    let input = form.into_input()?;

    let mut conn = state.db.connect().await?;
    let result = IncidentRepo::update(&mut conn, incident_id, &input).await;
    release(conn).await;
    let updated = result?;

    tracing::info!(incident_id, updated, "Incident update applied");

    Ok(Redirect::to(INCIDENTS_PATH))
}

/// GET /incidents/delete/{id}
///
/// An unknown id is a silent no-op.
pub async fn delete_incident(
    State(state): State<AppState>,
    Path(incident_id): Path<DbId>,
) -> AppResult<Redirect> {
    let mut conn = state.db.connect().await?;
    let result = IncidentRepo::delete(&mut conn, incident_id).await;
    release(conn).await;
    let deleted = result?;

    tracing::info!(incident_id, deleted, "Incident delete applied");

    Ok(Redirect::to(INCIDENTS_PATH))
}
