//! Shared response envelope type for API handlers.
//!
//! Every view is returned as `{ "data": ... }` so the rendering layer sees
//! one shape regardless of the page.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
