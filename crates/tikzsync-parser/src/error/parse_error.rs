//! The ParseError type for wrapping diagnostics.

use std::fmt;

use crate::error::Diagnostic;

/// Error returned when a plot expression cannot be compiled.
///
/// Wraps one or more diagnostics.
#[derive(Debug, Clone)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    /// Create a new parse error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the error and return its diagnostics.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Shift every label by `offset` bytes.
    ///
    /// Expression spans are relative to the expression text; this moves them
    /// into the coordinates of the document the expression was read from.
    pub fn shifted(self, offset: usize) -> Self {
        Self {
            diagnostics: self
                .diagnostics
                .into_iter()
                .map(|diag| diag.shifted(offset))
                .collect(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{}", first)?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, span::Span};

    #[test]
    fn test_parse_error_from_diagnostic() {
        let diag = Diagnostic::error("unknown function `foo`").with_code(ErrorCode::E102);
        let err: ParseError = diag.into();

        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.diagnostics()[0].message(), "unknown function `foo`");
    }

    #[test]
    fn test_parse_error_display_multiple() {
        let diags = vec![
            Diagnostic::error("first error"),
            Diagnostic::error("second error"),
            Diagnostic::error("third error"),
        ];
        let err: ParseError = diags.into();

        assert_eq!(err.to_string(), "error: first error (+2 more)");
    }

    #[test]
    fn test_parse_error_shifted() {
        let err: ParseError = Diagnostic::error("bad")
            .with_label(Span::new(1..2), "here")
            .into();
        let err = err.shifted(40);

        assert_eq!(err.diagnostics()[0].labels()[0].span(), Span::new(41..42));
    }
}
