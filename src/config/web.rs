use crate::adapters::http::DEFAULT_SERVICE;
use crate::config::file_config::FileConfig;
use crate::utils::error::{MergeError, Result};
use crate::utils::hex;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const SECRET_KEY_VAR: &str = "BSKY_MERGE_SECRET_KEY";

#[derive(Debug, Clone, Parser)]
#[command(name = "bsky-list-merge-web")]
#[command(about = "Web form for merging one Bluesky starter pack into another")]
pub struct WebArgs {
    /// Address to listen on [default: 127.0.0.1:5000]
    #[arg(long)]
    pub bind: Option<String>,

    /// API root of the service [default: https://bsky.social]
    #[arg(long)]
    pub service: Option<String>,

    /// Optional TOML file with [service] and [web] sections
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Immutable server configuration shared by every request.
#[derive(Clone)]
pub struct WebConfig {
    pub bind: SocketAddr,
    pub service: String,
    pub secret_key: String,
}

impl std::fmt::Debug for WebConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebConfig")
            .field("bind", &self.bind)
            .field("service", &self.service)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl WebConfig {
    pub fn new(service: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            bind: parse_bind(DEFAULT_BIND)?,
            service: service.into(),
            secret_key: secret_key.into(),
        })
    }
}

impl WebArgs {
    /// Command line beats the config file; the secret key may also come from the
    /// environment. Without one, a random key is generated for this process.
    pub fn resolve_config<F>(&self, env: F) -> Result<WebConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match &self.config {
            Some(path) => {
                let file = FileConfig::from_file(path)?;
                file.validate()?;
                file
            }
            None => FileConfig::default(),
        };
        let web = file.web.clone().unwrap_or_default();

        let bind = self
            .bind
            .as_deref()
            .or(web.bind.as_deref())
            .unwrap_or(DEFAULT_BIND);
        let service = self
            .service
            .as_deref()
            .or(file.service_endpoint())
            .unwrap_or(DEFAULT_SERVICE)
            .to_string();
        let secret_key = match env(SECRET_KEY_VAR)
            .filter(|key| !key.is_empty())
            .or(web.secret_key)
        {
            Some(key) => key,
            None => ephemeral_secret()?,
        };

        let config = WebConfig {
            bind: parse_bind(bind)?,
            service,
            secret_key,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Validate for WebConfig {
    fn validate(&self) -> Result<()> {
        validate_url("service", &self.service)?;
        validate_non_empty_string("secret_key", &self.secret_key)?;
        Ok(())
    }
}

fn parse_bind(bind: &str) -> Result<SocketAddr> {
    bind.parse().map_err(|e| MergeError::InvalidConfigValue {
        field: "bind".to_string(),
        value: bind.to_string(),
        reason: format!("{}", e),
    })
}

fn ephemeral_secret() -> Result<String> {
    tracing::warn!(
        "No {} configured; flash messages will not survive a restart",
        SECRET_KEY_VAR
    );
    let mut bytes = [0u8; 32];
    getrandom::fill(&mut bytes)
        .map_err(|e| MergeError::config(format!("failed to generate secret key: {}", e)))?;
    Ok(hex::encode(&bytes))
}
