//! Wire types for the admin API.

use crate::nav::NavEntry;
use serde::{Deserialize, Serialize};
use tablier_core::{ColumnDescriptor, PageResult, RowRecord};

/// `GET /admin/models` response.
#[derive(Debug, Serialize)]
pub struct NavResponse {
    pub success: bool,
    #[serde(rename = "navItems")]
    pub nav_items: Vec<NavEntry>,
}

/// Query parameters of `GET /admin/models/{model}`.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// `GET /admin/models/{model}` response: one page of rows plus the column
/// metadata the grid renders from.
#[derive(Debug, Serialize)]
pub struct ModelPageResponse {
    pub success: bool,
    pub model: String,
    pub data: Vec<RowRecord>,
    pub columns: Vec<ColumnDescriptor>,
    pub pagination: Pagination,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Pagination {
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

impl ModelPageResponse {
    pub fn from_page(model: String, page: PageResult) -> Self {
        Self {
            success: true,
            model,
            data: page.rows,
            columns: page.columns,
            pagination: Pagination {
                total: page.total,
                page: page.page,
                limit: page.limit,
                total_pages: page.total_pages,
            },
        }
    }
}

/// `POST /admin/models/row` request body.
#[derive(Debug, Deserialize)]
pub struct InsertRowRequest {
    pub model: String,
    /// Column metadata echoed back by the UI. Accepted for wire
    /// compatibility but ignored: validation always uses fresh
    /// server-side introspection.
    #[serde(default)]
    pub fields: Vec<serde_json::Value>,
    pub data: serde_json::Map<String, serde_json::Value>,
}

/// `POST /admin/models/row` success response.
#[derive(Debug, Serialize)]
pub struct InsertRowResponse {
    pub success: bool,
    pub data: RowRecord,
}
