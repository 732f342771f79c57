//! # Application Errors
//!
//! Error types for the command-line front end.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in drape-quote                            │
//! │                                                                         │
//! │  ConfigError  ──┐                                                       │
//! │  RequestError ──┼──► AppError { code, message } ──► stderr + exit code  │
//! │  RenderError  ──┘                                                       │
//! │                                                                         │
//! │  exit 2  configuration      exit 3  request file / item                 │
//! │  exit 4  quote validation   exit 5  rendering / output                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use drape_render::RenderError;
use thiserror::Error;

// =============================================================================
// Config Errors
// =============================================================================

/// Configuration loading and saving errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file already exists: {0}")]
    AlreadyExists(PathBuf),

    /// No `--config` given and no platform config directory.
    #[error("No config path available")]
    NoConfigPath,

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Request Errors
// =============================================================================

/// Quote request file errors.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Failed to read request {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid request file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A single item could not be priced or added.
    ///
    /// `index` is 1-based, in file order.
    #[error("Item {index} ({room}): {reason}")]
    Item {
        index: usize,
        room: String,
        reason: String,
    },
}

// =============================================================================
// App Error
// =============================================================================

/// Broad failure categories, each with its own exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Config,
    Request,
    Validation,
    Render,
}

impl ErrorCode {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCode::Config => 2,
            ErrorCode::Request => 3,
            ErrorCode::Validation => 4,
            ErrorCode::Render => 5,
        }
    }
}

/// Error returned from every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.code.exit_code()
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::Config, err.to_string())
    }
}

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        AppError::new(ErrorCode::Request, err.to_string())
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Validation(e) => AppError::new(
                ErrorCode::Validation,
                format!("Quote is not ready for rendering: {}", e),
            ),
            RenderError::Io { .. } | RenderError::Persist { .. } => {
                tracing::error!(error = %err, "Failed to write document");
                AppError::new(ErrorCode::Render, err.to_string())
            }
            RenderError::Encode(_) => AppError::new(ErrorCode::Render, err.to_string()),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

/// Convenience type alias for command results.
pub type AppResult<T> = Result<T, AppError>;
