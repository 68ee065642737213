use axum::Json;
use serde::Serialize;

use crate::response::DataResponse;

/// Landing page payload. Carries no incident data.
#[derive(Debug, Serialize)]
pub struct LandingView {
    pub service: &'static str,
    pub version: &'static str,
}

/// GET /
pub async fn landing() -> Json<DataResponse<LandingView>> {
    Json(DataResponse {
        data: LandingView {
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        },
    })
}
