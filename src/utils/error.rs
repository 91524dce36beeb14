use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{endpoint} returned HTTP {status}: {body}")]
    Http {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Session response is missing {field}")]
    InvalidSession { field: String },

    #[error("List with ID {list_id} not found for user {handle}.")]
    ListNotFound { list_id: String, handle: String },

    #[error("Starter pack with ID {pack_id} not found for user {handle}.")]
    StarterPackNotFound { pack_id: String, handle: String },

    #[error("Source list is empty or invalid.")]
    EmptySource,
}

/// Characters of an upstream response body kept by [`MergeError::summary`].
pub const BODY_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Resolution,
    Upstream,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl MergeError {
    pub fn config(message: impl Into<String>) -> Self {
        MergeError::Config {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            MergeError::Config { .. }
            | MergeError::MissingConfig { .. }
            | MergeError::InvalidConfigValue { .. }
            | MergeError::InvalidUrl { .. } => ErrorCategory::Configuration,
            MergeError::ListNotFound { .. } | MergeError::StarterPackNotFound { .. } => {
                ErrorCategory::Resolution
            }
            MergeError::Transport(_) | MergeError::Http { .. } | MergeError::InvalidSession { .. } => {
                ErrorCategory::Upstream
            }
            MergeError::Serialization(_) | MergeError::EmptySource => ErrorCategory::Data,
            MergeError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Resolution | ErrorCategory::Data => {
                ErrorSeverity::High
            }
            ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the CLI; every failure is non-zero.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    /// Like `Display`, but with long upstream bodies cut to a preview.
    pub fn summary(&self) -> String {
        match self {
            MergeError::Http {
                endpoint,
                status,
                body,
            } if body.chars().count() > BODY_PREVIEW_CHARS => {
                let preview: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
                format!("{} returned HTTP {}: {}...", endpoint, status, preview)
            }
            other => other.to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MergeError::MissingConfig { field } => {
                format!("Please set {} before running the import.", field)
            }
            MergeError::Http { status: 401, .. } | MergeError::Http { status: 403, .. } => {
                "The service rejected the credentials or the session.".to_string()
            }
            MergeError::Transport(_) => "Could not reach the service.".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MergeError::MissingConfig { .. } | MergeError::Config { .. } => {
                "Set BSKY_HANDLE and BSKY_APP_PASSWORD, or pass --config with a [credentials] section"
            }
            MergeError::InvalidConfigValue { .. } | MergeError::InvalidUrl { .. } => {
                "Check the URLs and configuration values passed on the command line"
            }
            MergeError::ListNotFound { .. } | MergeError::StarterPackNotFound { .. } => {
                "Open the URL in a browser and confirm the handle and ID are correct"
            }
            MergeError::Http { status: 401, .. }
            | MergeError::Http { status: 403, .. }
            | MergeError::InvalidSession { .. } => {
                "Use an app password and make sure the handle matches the account"
            }
            MergeError::Http { .. } | MergeError::Transport(_) => {
                "Re-run the import once the service is reachable; items already added will be added again"
            }
            MergeError::EmptySource => "Pick a source that has at least one member",
            MergeError::Serialization(_) => "The service returned an unexpected response shape",
            MergeError::Io(_) => "Check file permissions and paths",
        }
    }
}

pub type Result<T> = std::result::Result<T, MergeError>;
