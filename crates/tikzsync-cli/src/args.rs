//! Command-line argument definitions for the tikzsync CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input file, where the regenerated
//! code and the SVG preview go, the configuration file, and the logging
//! verbosity.

use clap::Parser;

/// Command-line arguments for the tikzsync tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input TikZ file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path for the regenerated TikZ code (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path for the SVG preview
    #[arg(long)]
    pub svg: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
