//! Response envelope for the admin API.
//!
//! Admin endpoints wrap their payload as `{ "data": ... }`. Errors use the
//! `{ "error", "code" }` shape from [`crate::error::AppError`].

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: pages }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
