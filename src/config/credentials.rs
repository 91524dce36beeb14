use crate::config::file_config::CredentialsSection;
use crate::utils::error::{MergeError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use std::fmt;

pub const HANDLE_VAR: &str = "BSKY_HANDLE";
pub const APP_PASSWORD_VAR: &str = "BSKY_APP_PASSWORD";

/// Login identifier and app password for one run.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub handle: String,
    pub app_password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("handle", &self.handle)
            .field("app_password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(handle: impl Into<String>, app_password: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            app_password: app_password.into(),
        }
    }

    /// Environment values win over the config file; empty values count as unset.
    pub fn from_lookup<F>(lookup: F, file: Option<&CredentialsSection>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |var: &str, fallback: Option<&String>| {
            lookup(var)
                .filter(|value| !value.is_empty())
                .or_else(|| fallback.filter(|value| !value.is_empty()).cloned())
        };

        let handle = pick(HANDLE_VAR, file.and_then(|f| f.handle.as_ref()));
        let app_password = pick(APP_PASSWORD_VAR, file.and_then(|f| f.app_password.as_ref()));

        match (handle, app_password) {
            (Some(handle), Some(app_password)) => Ok(Self::new(handle, app_password)),
            (None, _) => Err(MergeError::MissingConfig {
                field: HANDLE_VAR.to_string(),
            }),
            (_, None) => Err(MergeError::MissingConfig {
                field: APP_PASSWORD_VAR.to_string(),
            }),
        }
    }
}

impl Validate for Credentials {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("handle", &self.handle)?;
        validate_non_empty_string("app_password", &self.app_password)?;
        Ok(())
    }
}
