use crate::utils::error::{MergeError, Result};
use crate::utils::validation::{validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional TOML configuration shared by the CLI and the web form.
///
/// ```toml
/// [service]
/// endpoint = "https://bsky.social"
///
/// [credentials]
/// handle = "me.bsky.social"
/// app_password = "${MY_APP_PASSWORD}"
///
/// [web]
/// bind = "127.0.0.1:5000"
/// secret_key = "${FLASH_SECRET}"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub service: ServiceSection,
    pub credentials: Option<CredentialsSection>,
    pub web: Option<WebSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceSection {
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsSection {
    pub handle: Option<String>,
    pub app_password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebSection {
    pub bind: Option<String>,
    pub secret_key: Option<String>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MergeError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| MergeError::InvalidConfigValue {
            field: "toml_parsing".to_string(),
            value: String::new(),
            reason: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| MergeError::config(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn service_endpoint(&self) -> Option<&str> {
        self.service.endpoint.as_deref()
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        if let Some(endpoint) = self.service_endpoint() {
            validate_url("service.endpoint", endpoint)?;
        }
        Ok(())
    }
}
