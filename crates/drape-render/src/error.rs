//! # Render Error Types
//!
//! Error types for document rendering.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Quote::validate_for_render ──► ValidationError                        │
//! │  tempfile / std::io         ──► io::Error                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RenderError (this module) ← Adds the path that failed                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (in CLI) ← Exit code + user-facing message                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logo problems never show up here: a logo that cannot be loaded is logged
//! and the header is drawn without it.

use std::path::PathBuf;

use drape_core::ValidationError;
use thiserror::Error;

/// Document rendering errors.
///
/// In every case the quote is left untouched and no output file exists.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The quote is not ready to be rendered.
    ///
    /// ## When This Occurs
    /// - No line items
    /// - A client field is empty
    #[error("Quote is not ready for rendering: {0}")]
    Validation(#[from] ValidationError),

    /// The layout could not be turned into a PDF.
    #[error("Failed to encode document: {0}")]
    Encode(String),

    /// Writing the temporary output file failed.
    ///
    /// ## When This Occurs
    /// - Destination directory does not exist
    /// - No write permission
    /// - Disk full
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Moving the finished temporary file over the destination failed.
    #[error("Failed to save {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results with RenderError.
pub type RenderResult<T> = Result<T, RenderError>;
