//! # tikzsync Parser
//!
//! Tolerant reconstruction of a [`Scene`](tikzsync_core::scene::Scene) from
//! hand-edited TikZ code, and the sandboxed evaluator for plot expressions.
//!
//! ## Usage
//!
//! ```
//! use tikzsync_core::scene::Scene;
//!
//! let source = r"
//!     \begin{tikzpicture}
//!       \draw[draw=ff0000, dashed] (1,1) rectangle ++(3,2);
//!       not tikz at all
//!     \end{tikzpicture}
//! ";
//!
//! let outcome = tikzsync_parser::parse(source);
//! assert_eq!(outcome.recognized(), 1);
//! assert_eq!(outcome.diagnostics().len(), 1);
//!
//! let mut scene = Scene::new();
//! assert!(outcome.apply_to(&mut scene));
//! ```
//!
//! Code parsing works one line at a time:
//!
//! 1. **Strip** - trailing `%` comments and surrounding whitespace
//! 2. **Context** - `tikzpicture` lines are skipped, `axis` lines set the plot context
//! 3. **Recognize** - the first matching entry of [`RECOGNIZERS`] produces the element
//! 4. **Report** - unmatched lines become warnings, never errors

pub mod error;
pub mod expr;
pub mod options;
mod parser;
#[cfg(test)]
mod parser_tests;
mod recognizer;
mod span;

pub use parser::{CodeParser, ParseOutcome};
pub use recognizer::{RECOGNIZERS, Recognizer};
pub use span::Span;

/// Parses TikZ code with the default recognizer table.
///
/// See [`CodeParser::parse`].
pub fn parse(text: &str) -> ParseOutcome {
    CodeParser::default().parse(text)
}
