//! The authorization gate short-circuits before any database access.
//!
//! The store below is built lazily and points at a database that does not
//! exist; these tests pass precisely because rejected requests never reach
//! it.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Duration;
use serde_json::Value;
use tablier_admin::{AppState, admin_router};
use tablier_core::Role;
use tablier_pg::{AdminStore, AdminStoreOptions};
use tablier_token::{KeyPair, TokenMinter, TokenVerifier};
use tower::util::ServiceExt;

struct Harness {
    router: axum::Router,
    minter: TokenMinter,
}

fn harness() -> Harness {
    let keypair = KeyPair::generate().unwrap();
    let minter = TokenMinter::new(keypair.clone());
    let verifier = TokenVerifier::new(keypair.public_key());

    let store = AdminStore::connect_lazy(
        "postgres://nobody@localhost:1/tablier_unreachable",
        AdminStoreOptions::default(),
    )
    .unwrap();

    Harness {
        router: admin_router(AppState::new(store, verifier)),
        minter,
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn missing_header_yields_401_envelope() {
    let harness = harness();
    let response = harness
        .router
        .oneshot(
            Request::builder()
                .uri("/admin/models")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], Value::Bool(false));
    assert_eq!(body["error"], "Non authentifié");
}

#[tokio::test]
async fn malformed_token_yields_401() {
    let harness = harness();
    let response = harness
        .router
        .oneshot(
            Request::builder()
                .uri("/admin/models/users")
                .header(header::AUTHORIZATION, "Bearer garbage")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn user_role_yields_403_envelope() {
    let harness = harness();
    let token = harness
        .minter
        .mint("user-1", Role::User, Duration::hours(1))
        .unwrap();

    let response = harness
        .router
        .oneshot(
            Request::builder()
                .uri("/admin/models")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Accès non autorisé");
}

#[tokio::test]
async fn the_write_path_is_gated_too() {
    let harness = harness();
    let response = harness
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/models/row")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"model":"users","data":{"email":"a@b.c"}}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
