//! CLI logic for the tikzsync tool.
//!
//! The input file is fed to a [`SyncController`] as one text edit, the
//! reconstructed scene is regenerated into canonical TikZ code and,
//! optionally, rendered to an SVG preview.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use config::ConfigError;

use std::{fs, io::Write as _};

use log::{info, warn};

use tikzsync::{
    Renderer, TikzSyncError,
    export::{Exporter, svg::SvgExporter},
    preview::PlotFailure,
    sync::SyncController,
};
use tikzsync_parser::error::Diagnostic;

use error_adapter::{Reportable, diagnostics_to_reportables, to_reportables};

/// What a run found worth reporting without failing.
#[derive(Debug)]
pub struct RunReport {
    source: String,
    code: String,
    diagnostics: Vec<Diagnostic>,
    plot_failures: Vec<TikzSyncError>,
}

impl RunReport {
    /// The input text as read.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The regenerated canonical code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Warnings for input lines that were left out of the scene.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Plots whose expression could not be compiled for the preview.
    pub fn plot_failures(&self) -> &[TikzSyncError] {
        &self.plot_failures
    }

    /// Every warning of the run, ready for miette rendering.
    pub fn reportables(&self) -> Vec<Reportable<'_>> {
        let mut reportables = diagnostics_to_reportables(&self.diagnostics, &self.source);
        reportables.extend(self.plot_failures.iter().flat_map(to_reportables));
        reportables
    }
}

/// Run the tikzsync CLI application
///
/// Reads the input file, rebuilds the scene from it, writes the canonical
/// code to the output path (or stdout) and the SVG preview if requested.
///
/// # Errors
///
/// Returns `TikzSyncError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Export errors
pub fn run(args: &Args) -> Result<RunReport, TikzSyncError> {
    info!(input_path = args.input; "Processing TikZ file");

    let app_config = config::load_config(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;

    let mut controller = SyncController::new();
    controller.edit_text(source.as_str());
    let diagnostics = controller.diagnostics().to_vec();
    if !diagnostics.is_empty() {
        warn!(skipped = diagnostics.len(); "Some lines were left out of the scene");
    }

    // The edit kept the text verbatim; regenerate from the rebuilt scene.
    controller.notify_scene_changed();
    let code = controller.insert_final_code();

    match &args.output {
        Some(path) => {
            fs::write(path, &code)?;
            info!(output_file = path; "TikZ code written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{code}")?;
        }
    }

    let renderer = Renderer::new(app_config);
    let preview = renderer.preview(controller.scene())?;
    let plot_failures: Vec<TikzSyncError> =
        preview.failures().iter().map(PlotFailure::to_error).collect();

    if let Some(path) = &args.svg {
        let mut exporter = SvgExporter::new(path, renderer.config().preview())?;
        exporter.export_preview(&preview)?;
        info!(output_file = path; "SVG exported successfully");
    }

    Ok(RunReport {
        source,
        code,
        diagnostics,
        plot_failures,
    })
}
