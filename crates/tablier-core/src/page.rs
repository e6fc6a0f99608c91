//! Paginated, self-describing query results.

use crate::row::RowRecord;
use crate::schema::ColumnDescriptor;
use serde::{Deserialize, Serialize};

/// One page of rows from a table, together with the column metadata the
/// caller needs to render it.
///
/// Invariants: `page >= 1`, `limit >= 1`,
/// `total_pages == ceil(total / limit)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
    pub rows: Vec<RowRecord>,
    pub columns: Vec<ColumnDescriptor>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl PageResult {
    /// `ceil(total / limit)`, saturating on pathological totals.
    pub fn pages_for(total: i64, limit: u32) -> u32 {
        let limit = i64::from(limit.max(1));
        let pages = (total.max(0) + limit - 1) / limit;
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}
