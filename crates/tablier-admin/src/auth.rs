//! Authorization gate for the admin API.
//!
//! Every `/admin` route passes through [`require_admin`] before any
//! catalog or data access happens. The gate only decodes and checks the
//! token; it never touches the database. A request reaching a handler
//! without a [`CallerIdentity`] extension is a bug.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use tablier_core::{CallerIdentity, Role};
use tablier_token::TokenVerifier;

use crate::error::ApiError;
use crate::state::AppState;

/// Axum middleware: authorize the request and stash the verified identity
/// as a request extension.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = authorize(state.verifier(), request.headers())?;
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Decode and check the caller identity. Fails closed: a missing,
/// malformed, forged or expired token is `Unauthenticated`; a verified
/// caller without the ADMIN role is `Forbidden`.
pub fn authorize(
    verifier: &TokenVerifier,
    headers: &HeaderMap,
) -> Result<CallerIdentity, ApiError> {
    let token = extract_bearer(headers).ok_or(ApiError::Unauthenticated)?;

    let identity = verifier.verify(&token).map_err(|err| {
        tracing::debug!(error = %err, "identity token rejected");
        ApiError::Unauthenticated
    })?;

    if identity.role != Role::Admin {
        return Err(ApiError::Forbidden);
    }
    Ok(identity)
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let rest = value.strip_prefix("Bearer ")?.trim();
    if rest.is_empty() {
        return None;
    }
    Some(rest.to_string())
}
