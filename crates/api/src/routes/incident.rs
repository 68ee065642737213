//! Route definitions for incident pages.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::incident;
use crate::state::AppState;

/// Incident routes.
///
/// ```text
/// GET  /incidents                 -> list_incidents
/// POST /incidents/create          -> create_incident
/// GET  /incidents/update/{id}     -> edit_incident_form
/// POST /incidents/update/{id}     -> update_incident
/// GET  /incidents/delete/{id}     -> delete_incident
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/incidents", get(incident::list_incidents))
        .route("/incidents/create", post(incident::create_incident))
        .route(
            "/incidents/update/{id}",
            get(incident::edit_incident_form).post(incident::update_incident),
        )
        .route("/incidents/delete/{id}", get(incident::delete_incident))
}
