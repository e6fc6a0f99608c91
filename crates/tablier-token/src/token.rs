//! Token minting and verification.

use crate::error::TokenError;
use crate::keys::KeyPair;
use biscuit_auth::builder::AuthorizerBuilder;
use biscuit_auth::macros::fact;
use biscuit_auth::{Authorizer, Biscuit, PublicKey};
use chrono::{Duration, Utc};
use tablier_core::{CallerIdentity, Role};

/// Mints signed identity tokens. Lives server-side only; anything holding
/// the private key can impersonate any user.
pub struct TokenMinter {
    keypair: KeyPair,
}

impl TokenMinter {
    pub fn new(keypair: KeyPair) -> Self {
        Self { keypair }
    }

    /// Mint a token for `user_id` with the given role, valid for `ttl`.
    pub fn mint(&self, user_id: &str, role: Role, ttl: Duration) -> Result<String, TokenError> {
        let expiry = (Utc::now() + ttl).timestamp();

        let biscuit = Biscuit::builder()
            .fact(fact!("user({id})", id = user_id.to_string()))
            .map_err(|e| TokenError::TokenCreationFailed(e.to_string()))?
            .fact(fact!("role({role})", role = role.as_str().to_string()))
            .map_err(|e| TokenError::TokenCreationFailed(e.to_string()))?
            .fact(fact!("expiry({expiry})", expiry = expiry))
            .map_err(|e| TokenError::TokenCreationFailed(e.to_string()))?
            .build(self.keypair.inner())
            .map_err(|e| TokenError::TokenCreationFailed(e.to_string()))?;

        biscuit
            .to_base64()
            .map_err(|e| TokenError::TokenCreationFailed(e.to_string()))
    }
}

/// Verifies identity tokens against the server's public key.
pub struct TokenVerifier {
    public_key: PublicKey,
}

impl TokenVerifier {
    pub fn new(public_key: PublicKey) -> Self {
        Self { public_key }
    }

    /// Build a verifier from a hex-encoded public key.
    pub fn from_hex(hex: &str) -> Result<Self, TokenError> {
        Ok(Self::new(crate::keys::load_public_key_hex(hex)?))
    }

    /// Check the token's signature and expiry, then extract the caller
    /// identity. Never touches the database.
    pub fn verify(&self, token: &str) -> Result<CallerIdentity, TokenError> {
        let biscuit = Biscuit::from_base64(token, self.public_key.clone())
            .map_err(|e| TokenError::TokenParseFailed(e.to_string()))?;

        let now = Utc::now().timestamp();
        let mut authorizer = AuthorizerBuilder::new()
            .code(format!(
                r#"
                time({now});
                allow if true;
                "#
            ))
            .map_err(|e| TokenError::VerificationFailed(e.to_string()))?
            .build(&biscuit)
            .map_err(|e| TokenError::VerificationFailed(e.to_string()))?;

        authorizer
            .authorize()
            .map_err(|e| TokenError::VerificationFailed(e.to_string()))?;

        let user = query_first_string(&mut authorizer, "user")?;
        let role_str = query_first_string(&mut authorizer, "role")?;
        let expiry = query_first_i64(&mut authorizer, "expiry")?;

        if now > expiry {
            return Err(TokenError::Expired { expired_at: expiry });
        }

        let role: Role = role_str
            .parse()
            .map_err(|_| TokenError::UnknownRole(role_str))?;

        Ok(CallerIdentity::new(user, role))
    }
}

fn query_first_string(authorizer: &mut Authorizer, name: &str) -> Result<String, TokenError> {
    let rule: biscuit_auth::builder::Rule = format!("data($x) <- {name}($x)")
        .parse()
        .map_err(|e: biscuit_auth::error::Token| TokenError::VerificationFailed(e.to_string()))?;
    let results: Vec<(String,)> = authorizer
        .query(rule)
        .map_err(|e| TokenError::VerificationFailed(e.to_string()))?;
    results
        .into_iter()
        .next()
        .map(|(s,)| s)
        .ok_or_else(|| TokenError::MissingClaim {
            claim: name.to_string(),
        })
}

fn query_first_i64(authorizer: &mut Authorizer, name: &str) -> Result<i64, TokenError> {
    let rule: biscuit_auth::builder::Rule = format!("data($x) <- {name}($x)")
        .parse()
        .map_err(|e: biscuit_auth::error::Token| TokenError::VerificationFailed(e.to_string()))?;
    let results: Vec<(i64,)> = authorizer
        .query(rule)
        .map_err(|e| TokenError::VerificationFailed(e.to_string()))?;
    results
        .into_iter()
        .next()
        .map(|(n,)| n)
        .ok_or_else(|| TokenError::MissingClaim {
            claim: name.to_string(),
        })
}
