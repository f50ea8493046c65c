//! Diagnostics reported by the code parser and the expression evaluator.
//!
//! Nothing in this crate fails hard on bad input. Unrecognized lines and
//! invalid plot expressions are reported as [`Diagnostic`]s carrying an
//! [`ErrorCode`], a severity and labeled byte spans into the source text.
//!
//! # Example
//!
//! ```
//! # use tikzsync_parser::error::{Diagnostic, ErrorCode};
//! # use tikzsync_parser::Span;
//!
//! let diag = Diagnostic::warning("line not recognized")
//!     .with_code(ErrorCode::E200)
//!     .with_label(Span::new(10..24), "skipped")
//!     .with_help("supported commands: \\draw, \\node, \\addplot");
//!
//! assert_eq!(diag.to_string(), "warning[E200]: line not recognized");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
