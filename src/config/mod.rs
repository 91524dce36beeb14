pub mod credentials;
pub mod file_config;
#[cfg(feature = "web")]
pub mod web;

use crate::adapters::http::DEFAULT_SERVICE;
use crate::utils::error::Result;
use crate::utils::validation::{validate_url, Validate};
use credentials::Credentials;
use file_config::FileConfig;
use std::path::PathBuf;

#[cfg(feature = "cli")]
use clap::Parser;

/// Command-line arguments for the list import.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "bsky-list-merge")]
#[command(about = "Copy every member of one Bluesky list into another list")]
pub struct CliConfig {
    /// Source list URL, e.g. https://bsky.app/profile/alice.bsky.social/lists/3kabc
    pub source_list_url: String,

    /// Target list URL, owned by the logged-in account
    pub target_list_url: String,

    /// API root of the service [default: https://bsky.social]
    #[arg(long)]
    pub service: Option<String>,

    /// Optional TOML file with [service] and [credentials] sections
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Everything one run needs, built once at startup.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub service: String,
    pub credentials: Credentials,
}

impl RunSettings {
    /// Merge command-line values, an optional config file and the environment.
    ///
    /// Fails before any network activity when credentials are missing.
    pub fn resolve<F>(service: Option<&str>, config_path: Option<&PathBuf>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match config_path {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                let file = FileConfig::from_file(path)?;
                file.validate()?;
                file
            }
            None => FileConfig::default(),
        };

        let credentials = Credentials::from_lookup(env, file.credentials.as_ref())?;
        let service = service
            .or(file.service_endpoint())
            .unwrap_or(DEFAULT_SERVICE)
            .to_string();

        let settings = Self {
            service,
            credentials,
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for RunSettings {
    fn validate(&self) -> Result<()> {
        validate_url("service", &self.service)?;
        self.credentials.validate()
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn settings<F>(&self, env: F) -> Result<RunSettings>
    where
        F: Fn(&str) -> Option<String>,
    {
        RunSettings::resolve(self.service.as_deref(), self.config.as_ref(), env)
    }
}
