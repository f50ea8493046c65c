//! tikzsync - Bidirectional synchronization between TikZ code and a scene.
//!
//! A [`SyncController`](sync::SyncController) owns one editing session. The
//! scene view edits a [`Scene`](scene::Scene) and the code is regenerated
//! from it; the code view edits text and the scene is rebuilt from it. The
//! preview of the scene can be exported to SVG.

pub mod config;
pub mod export;
pub mod generator;
pub mod preview;
pub mod sync;
pub mod templates;

mod error;

pub use tikzsync_core::{color, geometry, scene};
pub use tikzsync_parser::{self as parser, CodeParser, ParseOutcome};

pub use error::TikzSyncError;

use log::{debug, info};

use config::AppConfig;
use preview::Preview;
use scene::Scene;

/// Renders scenes with one configuration.
///
/// # Examples
///
/// ```rust
/// use tikzsync::{Renderer, config::AppConfig, sync::SyncController};
///
/// let mut controller = SyncController::new();
/// controller.edit_text("\\draw (0,0) circle (1cm);");
///
/// let renderer = Renderer::new(AppConfig::default());
/// let svg = renderer
///     .render_svg(controller.scene())
///     .expect("Failed to render");
/// assert!(svg.contains("<circle"));
/// ```
#[derive(Debug, Default)]
pub struct Renderer {
    config: AppConfig,
}

impl Renderer {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Builds the pixel-space preview of `scene`.
    ///
    /// # Errors
    ///
    /// Returns `TikzSyncError::Config` if the configured viewport or sampling
    /// limits are invalid.
    pub fn preview(&self, scene: &Scene) -> Result<Preview, TikzSyncError> {
        let viewport = self
            .config
            .viewport()
            .viewport()
            .map_err(TikzSyncError::Config)?;
        let limits = self
            .config
            .sampling()
            .limits()
            .map_err(TikzSyncError::Config)?;
        let preview = Preview::build(scene, viewport, &limits);
        debug!(elements = scene.len(); "Preview ready");
        Ok(preview)
    }

    /// Renders `scene` to an SVG document string.
    ///
    /// Plots whose expression does not compile are left out; use
    /// [`preview`](Self::preview) to inspect them.
    ///
    /// # Errors
    ///
    /// Returns `TikzSyncError` for an invalid configuration or a rendering
    /// failure.
    pub fn render_svg(&self, scene: &Scene) -> Result<String, TikzSyncError> {
        let preview = self.preview(scene)?;
        let svg = export::svg::render(&preview, self.config.preview())?;
        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }
}
