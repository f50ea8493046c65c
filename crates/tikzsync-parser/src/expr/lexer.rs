//! Lexical analyzer for plot expressions.
//!
//! Converts expression text into [`PositionedToken`]s. Whitespace is skipped.
//! Lexing recovers after each bad character so that every problem in the
//! expression is reported in one pass.

use winnow::{
    Parser as _,
    ascii::{digit1, multispace0},
    combinator::{alt, opt},
    error::{AddContext, ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{one_of, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

/// A token of the arithmetic grammar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'a> {
    Number(f64),
    Ident(&'a str),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LeftParen,
    RightParen,
    Comma,
}

impl Token<'_> {
    /// Short human-readable form used in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number `{n}`"),
            Token::Ident(name) => format!("`{name}`"),
            Token::Plus => "`+`".to_string(),
            Token::Minus => "`-`".to_string(),
            Token::Star => "`*`".to_string(),
            Token::Slash => "`/`".to_string(),
            Token::Caret => "`^`".to_string(),
            Token::LeftParen => "`(`".to_string(),
            Token::RightParen => "`)`".to_string(),
            Token::Comma => "`,`".to_string(),
        }
    }
}

/// A token together with its byte span in the expression text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedToken<'a> {
    pub token: Token<'a>,
    pub span: Span,
}

/// Diagnostic details attached to winnow errors via `.context()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerDiagnostic {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<LexerDiagnostic>>;

/// Parse a numeric literal: digits with an optional fraction and exponent.
///
/// The digit run is captured greedily (`1.2.3` is one candidate) and then
/// checked, so a malformed literal is reported as such instead of as a
/// sequence of unexpected characters.
fn number<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();

    let text = (
        take_while(1.., |c: char| c.is_ascii_digit() || c == '.'),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .parse_next(input)?;

    match text.parse::<f64>() {
        Ok(value) => Ok(Token::Number(value)),
        Err(_) => Err(ErrMode::Cut(ContextError::new().add_context(
            input,
            &input.checkpoint(),
            LexerDiagnostic {
                code: ErrorCode::E002,
                message: "malformed number",
                help: Some("numbers look like `2`, `0.5`, `.5` or `1e-3`"),
                start,
            },
        ))),
    }
}

/// Parse a name: a letter or underscore followed by letters, digits or underscores.
fn identifier<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_')
        .verify(|s: &str| {
            s.chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        })
        .map(Token::Ident)
        .parse_next(input)
}

/// Parse single character tokens
fn symbol<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((
        '+'.value(Token::Plus),
        '-'.value(Token::Minus),
        '*'.value(Token::Star),
        '/'.value(Token::Slash),
        '^'.value(Token::Caret),
        '('.value(Token::LeftParen),
        ')'.value(Token::RightParen),
        ','.value(Token::Comma),
    ))
    .parse_next(input)
}

/// Parse a single token with position tracking
fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<PositionedToken<'a>> {
    let start_pos = input.current_token_start();
    let token = alt((number, identifier, symbol)).parse_next(input)?;
    let end_pos = input.current_token_start();

    Ok(PositionedToken {
        token,
        span: Span::new(start_pos..end_pos),
    })
}

struct Lexer<'a> {
    tokens: Vec<PositionedToken<'a>>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Lexer<'a> {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn tokenize(&mut self, mut input: Input<'a>) {
        loop {
            let _: IResult<&str> = multispace0.parse_next(&mut input);
            if input.is_empty() {
                break;
            }

            let token_start = input.current_token_start();
            match positioned_token(&mut input) {
                Ok(token) => self.tokens.push(token),
                Err(e) => {
                    let error_pos = input.current_token_start();
                    let width = input.chars().next().map_or(1, char::len_utf8);
                    self.diagnostics
                        .emit(Self::convert_err_mode(e, error_pos, width));

                    // A malformed number has already been consumed; anything
                    // else is skipped one character at a time.
                    if error_pos == token_start && !input.is_empty() {
                        input.next_token();
                    }
                }
            }
        }
    }

    fn finish(self) -> Result<Vec<PositionedToken<'a>>, ParseError> {
        self.diagnostics.finish().map(|()| self.tokens)
    }

    /// Convert an ErrMode to a Diagnostic.
    ///
    /// Falls back to E001 (unexpected character) when no diagnostic context
    /// is attached.
    fn convert_err_mode(
        err: ErrMode<ContextError<LexerDiagnostic>>,
        error_pos: usize,
        width: usize,
    ) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        if let Some(LexerDiagnostic {
            code,
            message,
            help,
            start,
        }) = context_error.context().next()
        {
            let span = Span::new(*start..error_pos);
            let mut diag = Diagnostic::error(*message)
                .with_code(*code)
                .with_label(span, code.description());
            if let Some(h) = help {
                diag = diag.with_help(*h);
            }
            return diag;
        }

        let span = Span::new(error_pos..error_pos + width);
        Diagnostic::error("unexpected character")
            .with_code(ErrorCode::E001)
            .with_label(span, ErrorCode::E001.description())
            .with_help("expressions may use numbers, `x`, `pi`, `e`, functions, `+ - * / ^`, parentheses and `,`")
    }
}

/// Tokenize an expression, collecting every lexing error.
pub fn tokenize(input: &str) -> Result<Vec<PositionedToken<'_>>, ParseError> {
    let mut lexer = Lexer::new();
    lexer.tokenize(LocatingSlice::new(input));
    lexer.finish()
}
