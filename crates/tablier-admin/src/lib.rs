//! # tablier-admin
//!
//! The HTTP-facing admin layer: every `/admin` route passes through the
//! authorization gate, then reads schema metadata and rows through
//! `tablier-pg`, and answers with a uniform envelope
//! (`{"success": true, ...}` or `{"success": false, "error": ...}`).

pub mod api_types;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod nav;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use nav::{NavEntry, NavVariant, build_navigation};
pub use routes::admin_router;
pub use state::AppState;
