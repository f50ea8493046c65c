//! Error codes for the tikzsync diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Expression lexer errors
//! - `E1xx` - Expression parser errors
//! - `E2xx` - TikZ code parser warnings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Expression Lexer Errors (E0xx)
    // =========================================================================
    /// Unexpected character.
    ///
    /// A character that is not part of the arithmetic grammar, such as `$`
    /// or `;`.
    E001,

    /// Malformed number.
    ///
    /// A numeric literal such as `1.2.3` that does not parse as a number.
    E002,

    // =========================================================================
    // Expression Parser Errors (E1xx)
    // =========================================================================
    /// Unexpected token.
    ///
    /// The parser encountered a token it did not expect at this position.
    E100,

    /// Incomplete input.
    ///
    /// The expression ended before a complete term was parsed, for example
    /// `1 +` or an unclosed `(`.
    E101,

    /// Unknown function.
    ///
    /// A name followed by `(` that is not in the function allow-list.
    E102,

    /// Unknown identifier.
    ///
    /// A bare name other than `x`, `pi` or `e`.
    E103,

    /// Wrong number of arguments.
    E104,

    /// Expression too complex.
    ///
    /// The expression exceeds the token limit or the nesting depth limit.
    E105,

    // =========================================================================
    // Code Parser Warnings (E2xx)
    // =========================================================================
    /// Unrecognized construct.
    ///
    /// A line that matches none of the supported commands. The line is
    /// skipped and left untouched in the source text.
    E200,

    /// Malformed numeric literal.
    ///
    /// A line whose shape matches a supported command but one of whose
    /// numeric fields does not parse. The whole line is skipped.
    E201,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unexpected character",
            ErrorCode::E002 => "malformed number",
            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "incomplete expression",
            ErrorCode::E102 => "unknown function",
            ErrorCode::E103 => "unknown identifier",
            ErrorCode::E104 => "wrong number of arguments",
            ErrorCode::E105 => "expression too complex",
            ErrorCode::E200 => "unrecognized construct",
            ErrorCode::E201 => "malformed numeric literal",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
