//! Error types for tikzsync operations.
//!
//! The synchronization engine itself never fails on user input. These errors
//! come from the edges: reading files, loading configuration, exporting a
//! preview, and plot expressions that the preview could not compile.

use std::io;

use thiserror::Error;

use tikzsync_parser::error::ParseError;

/// The main error type for tikzsync operations.
///
/// # Diagnostic Variants
///
/// The `Expression` variant keeps the expression source next to the
/// diagnostics so that their byte spans can be rendered against it.
#[derive(Debug, Error)]
pub enum TikzSyncError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Expression { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for TikzSyncError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl TikzSyncError {
    /// Create a new `Expression` error with the associated source text.
    pub fn new_expression_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Expression {
            err,
            src: src.into(),
        }
    }
}
