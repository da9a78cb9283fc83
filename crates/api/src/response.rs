//! Shared response envelope types for API handlers.
//!
//! Label endpoints wrap their payload in `{ "data": ... }`. The project,
//! status and user-lookup endpoints keep their bare array/object bodies.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
