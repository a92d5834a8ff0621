//! Page/limit arithmetic shared by every paginated list endpoint.

use serde::{Deserialize, Serialize};

/// Default page size when `limit` is omitted.
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest page size a client may request.
pub const MAX_LIMIT: i64 = 100;

/// Raw `?page=&limit=` query values as sent by the client.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// A clamped page request ready to be turned into `LIMIT`/`OFFSET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageParams {
    /// Clamp to `page >= 1` and `1 <= limit <= MAX_LIMIT`.
    pub fn clamp(self) -> PageRequest {
        PageRequest {
            page: self.page.unwrap_or(1).max(1),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Build the response metadata for a query that matched `total` rows.
    pub fn paginate(&self, total: i64) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
            total,
            total_pages: total_pages(total, self.limit),
        }
    }
}

/// Pagination block of a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

/// `ceil(total / limit)`, zero when there is nothing to page through.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

/// A page of rows plus its pagination metadata.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<i64>, limit: Option<i64>) -> PageParams {
        PageParams { page, limit }
    }

    #[test]
    fn defaults_to_first_page() {
        let req = params(None, None).clamp();
        assert_eq!(req, PageRequest { page: 1, limit: DEFAULT_LIMIT });
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(params(Some(0), Some(0)).clamp(), PageRequest { page: 1, limit: 1 });
        assert_eq!(params(Some(-3), Some(500)).clamp(), PageRequest { page: 1, limit: MAX_LIMIT });
    }

    #[test]
    fn offset_follows_page() {
        let req = params(Some(3), Some(25)).clamp();
        assert_eq!(req.offset(), 50);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(100, MAX_LIMIT), 1);
        assert_eq!(total_pages(101, MAX_LIMIT), 2);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let meta = params(Some(1), Some(MAX_LIMIT)).clamp().paginate(0);
        assert_eq!(meta.total, 0);
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.page, 1);
    }

    #[test]
    fn serializes_total_pages_in_camel_case() {
        let meta = params(Some(2), Some(5)).clamp().paginate(12);
        let json = serde_json::to_value(meta).unwrap();
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["page"], 2);
        assert!(json.get("total_pages").is_none());
    }
}
