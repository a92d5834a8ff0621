//! Shared response envelope types for API handlers.
//!
//! Single resources use a `{ "data": ... }` envelope; list endpoints return
//! [`Page`] with its `pagination` block next to `data`.

use agencia_core::pagination::{Page, PageRequest};
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: client }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Wrap a page of rows and the total match count into a list envelope.
pub fn paged<T: Serialize>(rows: Vec<T>, total: i64, page: PageRequest) -> Page<T> {
    Page {
        data: rows,
        pagination: page.paginate(total),
    }
}
