//! Request handlers for the admin API.
//!
//! The gate has already run by the time these execute, so every request
//! carries a verified [`CallerIdentity`] extension.

use axum::extract::{Extension, Path, Query, State};
use axum::Json;
use std::collections::HashMap;
use tablier_core::CallerIdentity;

use crate::api_types::{
    InsertRowRequest, InsertRowResponse, ModelPageResponse, NavResponse, PageParams,
};
use crate::error::ApiError;
use crate::nav;
use crate::state::AppState;

/// Page size applied when the caller does not send one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// `GET /admin/models`: the count-annotated navigation model.
pub async fn list_models(State(state): State<AppState>) -> Result<Json<NavResponse>, ApiError> {
    let store = state.store();
    let tables = store.list_tables().await?;

    let mut counts = HashMap::with_capacity(tables.len());
    for table in &tables {
        counts.insert(table.clone(), store.count_rows(table).await?);
    }

    Ok(Json(NavResponse {
        success: true,
        nav_items: nav::build_navigation(&tables, &counts),
    }))
}

/// `GET /admin/models/{model}`: one page of rows with column metadata.
pub async fn model_page(
    State(state): State<AppState>,
    Path(model): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<ModelPageResponse>, ApiError> {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, state.store().options().max_page_size);

    let result = state.store().read_page(&model, page, limit).await?;
    Ok(Json(ModelPageResponse::from_page(model, result)))
}

/// `POST /admin/models/row`: validate and insert one row.
pub async fn insert_model_row(
    State(state): State<AppState>,
    Extension(identity): Extension<CallerIdentity>,
    Json(request): Json<InsertRowRequest>,
) -> Result<Json<InsertRowResponse>, ApiError> {
    // Column metadata comes from the catalog, not from the request body;
    // the body's `fields` echo is ignored.
    let columns = state.store().describe_table(&request.model).await?;
    let row = state
        .store()
        .insert_row(&request.model, &columns, &request.data)
        .await?;

    tracing::info!(model = %request.model, admin = %identity.id, "admin row inserted");
    Ok(Json(InsertRowResponse {
        success: true,
        data: row,
    }))
}
