use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address, e.g. "0.0.0.0:8080"
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres connection string. For security: prefer setting env var
    /// `TABLIER_DATABASE_URL`.
    #[serde(default)]
    pub url: Option<String>,

    /// Schema whose tables the console exposes.
    #[serde(default = "default_schema")]
    pub schema: String,

    /// Upper bound for caller-supplied page sizes.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

fn default_schema() -> String {
    "public".to_string()
}

fn default_max_page_size() -> u32 {
    200
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            schema: default_schema(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl DatabaseConfig {
    pub fn resolve_url(&self) -> anyhow::Result<String> {
        if let Ok(url) = env::var("TABLIER_DATABASE_URL")
            && !url.is_empty()
        {
            return Ok(url);
        }
        self.url.clone().ok_or_else(|| {
            anyhow::anyhow!(
                "no database configured; set [database] url or TABLIER_DATABASE_URL"
            )
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Hex-encoded Ed25519 public key used to verify identity tokens, or
    /// a path to a file containing it. Prefer env var
    /// `TABLIER_PUBLIC_KEY`.
    #[serde(default)]
    pub public_key: Option<String>,
}

impl AuthConfig {
    pub fn resolve_public_key(&self) -> anyhow::Result<String> {
        if let Ok(key) = env::var("TABLIER_PUBLIC_KEY")
            && !key.is_empty()
        {
            return Ok(key);
        }
        self.public_key.clone().ok_or_else(|| {
            anyhow::anyhow!(
                "no verification key configured; set [auth] public_key or TABLIER_PUBLIC_KEY"
            )
        })
    }
}

/// Load the configuration file. A missing default `config.toml` yields the
/// built-in defaults; a path set via `TABLIER_CONFIG` must exist.
pub fn load_config() -> anyhow::Result<AppConfig> {
    match env::var("TABLIER_CONFIG") {
        Ok(path) => {
            let raw = fs::read_to_string(&path)?;
            Ok(toml::from_str(&raw)?)
        }
        Err(_) => {
            let path = PathBuf::from("config.toml");
            if path.exists() {
                let raw = fs::read_to_string(&path)?;
                Ok(toml::from_str(&raw)?)
            } else {
                Ok(AppConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.database.schema, "public");
        assert_eq!(config.database.max_page_size, 200);
        assert!(config.auth.public_key.is_none());
    }

    #[test]
    fn sections_override_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            bind = "127.0.0.1:9000"

            [database]
            url = "postgres://localhost/app"
            schema = "app"
            max_page_size = 50

            [auth]
            public_key = "deadbeef"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:9000");
        assert_eq!(config.database.url.as_deref(), Some("postgres://localhost/app"));
        assert_eq!(config.database.schema, "app");
        assert_eq!(config.database.max_page_size, 50);
        assert_eq!(config.auth.public_key.as_deref(), Some("deadbeef"));
    }
}
