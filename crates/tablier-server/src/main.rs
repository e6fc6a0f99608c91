use anyhow::Context;
use axum::{Json, Router, routing::get};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tablier_admin::{AppState, admin_router};
use tablier_core::Role;
use tablier_pg::{AdminStore, AdminStoreOptions};
use tablier_token::{KeyPair, TokenMinter, TokenVerifier, load_public_key_hex};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;

#[derive(Parser)]
#[command(name = "tablier", about = "Schema-driven admin console service", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (the default).
    Serve,

    /// Generate an Ed25519 keypair for token signing.
    Keygen {
        /// Where to write the hex-encoded private key.
        #[arg(long, default_value = "tablier.key")]
        private_key: PathBuf,
        /// Where to write the hex-encoded public key.
        #[arg(long, default_value = "tablier.pub")]
        public_key: PathBuf,
    },

    /// Mint an identity token for a user.
    MintToken {
        /// Private key: a file path or a hex-encoded string.
        #[arg(long, env = "TABLIER_PRIVATE_KEY")]
        key: Option<String>,
        /// User identifier embedded in the token.
        #[arg(long)]
        user: String,
        /// Role embedded in the token: ADMIN or USER.
        #[arg(long, default_value = "ADMIN")]
        role: String,
        /// Token lifetime, e.g. "12h" or "30m".
        #[arg(long, default_value = "12h")]
        ttl: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Keygen {
            private_key,
            public_key,
        } => keygen(&private_key, &public_key),
        Command::MintToken {
            key,
            user,
            role,
            ttl,
        } => mint_token(key, &user, &role, &ttl),
    }
}

async fn serve() -> anyhow::Result<()> {
    let config = config::load_config()?;

    let database_url = config.database.resolve_url()?;
    let store = AdminStore::connect(
        &database_url,
        AdminStoreOptions {
            schema: config.database.schema.clone(),
            max_page_size: config.database.max_page_size,
        },
    )
    .await
    .context("failed to connect to the database")?;

    let verifier = build_verifier(&config.auth)?;
    let state = AppState::new(store, verifier);

    let app = Router::new()
        .route("/healthz", get(healthz))
        .merge(admin_router(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!("tablier-server listening on {}", config.server.bind);
    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "ok": true, "service": "tablier-server" }))
}

/// Accept a hex key directly or a path to a file containing one.
fn build_verifier(auth: &config::AuthConfig) -> anyhow::Result<TokenVerifier> {
    let key = auth.resolve_public_key()?;
    let path = Path::new(&key);
    let hex = if path.exists() {
        std::fs::read_to_string(path)?
    } else {
        key
    };
    let public_key = load_public_key_hex(hex.trim())
        .context("failed to parse public key (expected hex-encoded Ed25519 key)")?;
    Ok(TokenVerifier::new(public_key))
}

fn keygen(private_key: &Path, public_key: &Path) -> anyhow::Result<()> {
    let keypair = KeyPair::generate()?;
    keypair.save_to_files(private_key, public_key)?;
    println!("private key written to {}", private_key.display());
    println!("public key written to  {}", public_key.display());
    println!("public key: {}", keypair.public_key_hex());
    Ok(())
}

fn mint_token(key: Option<String>, user: &str, role: &str, ttl: &str) -> anyhow::Result<()> {
    let keypair = resolve_private_key(key)?;
    let role: Role = role
        .parse()
        .map_err(|e| anyhow::anyhow!("{e}; expected ADMIN or USER"))?;
    let ttl = humantime::parse_duration(ttl).context("invalid --ttl (try \"12h\" or \"30m\")")?;
    let ttl = chrono::Duration::from_std(ttl).context("ttl out of range")?;

    let token = TokenMinter::new(keypair).mint(user, role, ttl)?;
    println!("{token}");
    Ok(())
}

/// Resolve a private key from either a file path or a hex-encoded string.
fn resolve_private_key(key: Option<String>) -> anyhow::Result<KeyPair> {
    let key_str = key.context(
        "private key not provided; pass --key <path|hex> or set TABLIER_PRIVATE_KEY",
    )?;

    let path = Path::new(&key_str);
    if path.exists() {
        return KeyPair::load_from_file(path)
            .with_context(|| format!("failed to load private key from {}", path.display()));
    }

    KeyPair::from_private_key_hex(key_str.trim())
        .context("failed to parse private key (expected hex-encoded Ed25519 key)")
}
