//! Export of previews to output formats.
//!
//! # Pipeline Position
//!
//! ```text
//! Scene
//!     ↓ preview (geometry mapper + expression sampling)
//! Preview primitives
//!     ↓ export (this module)
//! Output document
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::render`] and [`svg::SvgExporter`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`TikzSyncError::Export`](crate::TikzSyncError::Export) at the crate
//! boundary.

/// SVG export backend.
pub mod svg;

use crate::preview::Preview;

/// Abstraction for preview export backends.
pub trait Exporter {
    /// Exports a preview to the backend's output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the preview cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_preview(&mut self, preview: &Preview) -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
