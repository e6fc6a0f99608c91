//! Error type and envelope mapping for the admin API.
//!
//! Handlers bubble everything up as [`ApiError`]; the `IntoResponse`
//! impl is the single place where errors become HTTP statuses and
//! user-facing messages. Storage details are logged, never echoed.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tablier_pg::StoreError;
use thiserror::Error;

/// Errors surfaced by admin endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No token, or a token that does not decode/verify.
    #[error("authentication required")]
    Unauthenticated,

    /// A verified caller whose role is not ADMIN.
    #[error("admin role required")]
    Forbidden,

    /// Failure from the admin store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Store(StoreError::UnknownTable { .. }) => StatusCode::NOT_FOUND,
            ApiError::Store(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message shipped in the error envelope. User-facing wording
    /// stays French, matching the application's UI.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthenticated => "Non authentifié".to_string(),
            ApiError::Forbidden => "Accès non autorisé".to_string(),
            ApiError::Store(StoreError::UnknownTable { .. }) => "Modèle non trouvé".to_string(),
            ApiError::Store(StoreError::MissingField { column }) => {
                format!("Le champ {column} est obligatoire")
            }
            ApiError::Store(StoreError::InvalidValue { column, .. }) => {
                format!("La valeur du champ {column} est invalide")
            }
            ApiError::Store(StoreError::EmptyInsert) => {
                "Aucune donnée valide à insérer".to_string()
            }
            ApiError::Store(_) => {
                "Une erreur est survenue lors du traitement de la requête.".to_string()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store(err) = &self {
            if !err.is_validation() && !matches!(err, StoreError::UnknownTable { .. }) {
                tracing::error!(error = %err, "admin store failure");
            }
        }

        let status = self.status();
        let body = Json(json!({ "success": false, "error": self.user_message() }));
        (status, body).into_response()
    }
}
