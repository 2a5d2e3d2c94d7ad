//! Shared response envelope types for API handlers.
//!
//! Save endpoints use a `{ "data": ... }` envelope; the catalog endpoint
//! uses the `{ "items": [...] }` shape the catalog page consumes.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "items": [T] }` envelope for the game catalog listing.
#[derive(Debug, Serialize)]
pub struct ItemsResponse<T: Serialize> {
    pub items: T,
}
