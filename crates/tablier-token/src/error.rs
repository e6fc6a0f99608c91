//! Error types for token operations.

use thiserror::Error;

/// Errors that can occur while minting or verifying identity tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Failed to generate keypair.
    #[error("failed to generate keypair: {0}")]
    KeyGenerationFailed(String),

    /// Failed to parse private key.
    #[error("failed to parse private key: {0}")]
    InvalidPrivateKey(String),

    /// Failed to parse public key.
    #[error("failed to parse public key: {0}")]
    InvalidPublicKey(String),

    /// Failed to create token.
    #[error("failed to create token: {0}")]
    TokenCreationFailed(String),

    /// Failed to parse token (bad encoding or signature).
    #[error("failed to parse token: {0}")]
    TokenParseFailed(String),

    /// Token verification failed.
    #[error("token verification failed: {0}")]
    VerificationFailed(String),

    /// Token has expired.
    #[error("token expired at {expired_at}")]
    Expired { expired_at: i64 },

    /// Token is missing a required claim.
    #[error("token missing required claim: {claim}")]
    MissingClaim { claim: String },

    /// Token carries a role the application does not know.
    #[error("token carries unknown role '{0}'")]
    UnknownRole(String),

    /// IO error (reading/writing keys).
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
