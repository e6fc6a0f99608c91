//! # tablier-token
//!
//! Identity tokens for the Tablier admin console.
//!
//! The console never trusts a client-assembled identity payload: every
//! request carries a server-minted Biscuit token, signed with the server's
//! Ed25519 key and verified on arrival. A token holds three authority
//! facts:
//!
//! | Fact | Meaning |
//! |--------------|--------------------------------------|
//! | `user($id)` | Stable identifier of the signed-in user |
//! | `role($r)` | `"ADMIN"` or `"USER"` |
//! | `expiry($t)` | Unix timestamp after which the token is dead |
//!
//! Verification yields a [`tablier_core::CallerIdentity`]; authorization
//! decisions happen downstream, in the HTTP gate.

pub mod error;
pub mod keys;
pub mod token;

pub use biscuit_auth::PublicKey;
pub use error::TokenError;
pub use keys::{KeyPair, load_public_key_hex};
pub use token::{TokenMinter, TokenVerifier};
