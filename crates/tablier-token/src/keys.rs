//! Keypair management for identity tokens.

use crate::error::TokenError;
use biscuit_auth::{Algorithm, KeyPair as BiscuitKeyPair, PrivateKey, PublicKey};
use rand::RngCore;
use std::path::Path;

/// An Ed25519 keypair used to sign and verify identity tokens.
pub struct KeyPair {
    inner: BiscuitKeyPair,
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        let hex = self.private_key_hex();
        Self::from_private_key_hex(&hex).expect("key should be valid")
    }
}

impl KeyPair {
    /// Generate a new random keypair.
    pub fn generate() -> Result<Self, TokenError> {
        let mut rng = rand::rng();
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);

        let private_key = PrivateKey::from_bytes(&bytes, Algorithm::Ed25519)
            .map_err(|e| TokenError::KeyGenerationFailed(e.to_string()))?;
        Ok(Self {
            inner: BiscuitKeyPair::from(&private_key),
        })
    }

    /// Load a keypair from a hex-encoded private key string.
    pub fn from_private_key_hex(hex: &str) -> Result<Self, TokenError> {
        let private_key = PrivateKey::from_bytes_hex(hex, Algorithm::Ed25519)
            .map_err(|e| TokenError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self {
            inner: BiscuitKeyPair::from(&private_key),
        })
    }

    /// Load a keypair from a file holding the hex-encoded private key.
    pub fn load_from_file(private_key_path: &Path) -> Result<Self, TokenError> {
        let hex = std::fs::read_to_string(private_key_path)?;
        Self::from_private_key_hex(hex.trim())
    }

    /// Save the keypair as hex files (private and public halves).
    pub fn save_to_files(
        &self,
        private_key_path: &Path,
        public_key_path: &Path,
    ) -> Result<(), TokenError> {
        std::fs::write(private_key_path, self.private_key_hex())?;
        std::fs::write(public_key_path, self.public_key_hex())?;
        Ok(())
    }

    pub fn inner(&self) -> &BiscuitKeyPair {
        &self.inner
    }

    pub fn public_key(&self) -> PublicKey {
        self.inner.public()
    }

    pub fn private_key_hex(&self) -> String {
        self.inner.private().to_bytes_hex()
    }

    pub fn public_key_hex(&self) -> String {
        self.inner.public().to_bytes_hex()
    }
}

/// Load a public key from a hex string (verification-only deployments).
pub fn load_public_key_hex(hex: &str) -> Result<PublicKey, TokenError> {
    PublicKey::from_bytes_hex(hex, Algorithm::Ed25519)
        .map_err(|e| TokenError::InvalidPublicKey(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn generated_keys_round_trip_through_hex() {
        let keypair = KeyPair::generate().unwrap();
        let restored = KeyPair::from_private_key_hex(&keypair.private_key_hex()).unwrap();
        assert_eq!(keypair.public_key_hex(), restored.public_key_hex());
    }

    #[test]
    fn public_key_loads_from_hex() {
        let keypair = KeyPair::generate().unwrap();
        let loaded = load_public_key_hex(&keypair.public_key_hex()).unwrap();
        assert_eq!(loaded.to_bytes_hex(), keypair.public_key_hex());
    }

    #[test]
    fn keypair_loads_from_file() {
        let keypair = KeyPair::generate().unwrap();

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", keypair.private_key_hex()).unwrap();

        let loaded = KeyPair::load_from_file(file.path()).unwrap();
        assert_eq!(keypair.public_key_hex(), loaded.public_key_hex());
    }
}
