//! Route definitions for the admin API.

use crate::{auth, handlers, state::AppState};
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

/// Build the `/admin` router. The authorization gate wraps every route,
/// so no handler runs without a verified ADMIN identity.
pub fn admin_router(state: AppState) -> Router {
    Router::new()
        .route("/admin/models", get(handlers::list_models))
        .route("/admin/models/row", post(handlers::insert_model_row))
        .route("/admin/models/{model}", get(handlers::model_page))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ))
        .with_state(state)
}
