pub mod health;
pub mod incident;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the page route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                  landing page
/// /incidents                         list
/// /incidents/create                  create (POST)
/// /incidents/update/{id}             edit form (GET), update (POST)
/// /incidents/delete/{id}             delete (GET)
/// /report                            filtered report
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home::landing))
        .merge(incident::router())
        .route("/report", get(handlers::report::incident_report))
}
