//! Recursive-descent parser for plot expressions.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') unary | power
//! power   := primary ('^' unary)?
//! primary := number | name | name '(' args ')' | '(' expr ')'
//! args    := expr (',' expr)*
//! ```
//!
//! `^` is right-associative and binds tighter than unary minus, so `-x^2`
//! is `-(x^2)` and `2^3^2` is `2^(3^2)`.

use crate::{
    error::{Diagnostic, ErrorCode},
    span::Span,
};

use super::{
    ast::{self, BinaryOp, Expr, Function},
    lexer::{PositionedToken, Token},
};

/// Maximum number of tokens in one expression.
pub const MAX_TOKENS: usize = 256;

/// Maximum nesting depth of parentheses, calls and unary signs.
pub const MAX_DEPTH: usize = 64;

type Result<T> = std::result::Result<T, Diagnostic>;

struct Parser<'t, 'a> {
    tokens: &'t [PositionedToken<'a>],
    pos: usize,
    depth: usize,
    /// Byte length of the source, used to point at the end of input.
    source_len: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn peek(&self) -> Option<&'t PositionedToken<'a>> {
        self.tokens.get(self.pos)
    }

    fn peek_token(&self) -> Option<Token<'a>> {
        self.peek().map(|t| t.token)
    }

    fn advance(&mut self) -> Option<&'t PositionedToken<'a>> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn end_span(&self) -> Span {
        Span::new(self.source_len..self.source_len)
    }

    fn incomplete(&self, expected: &str) -> Diagnostic {
        Diagnostic::error(format!("expression ended early, expected {expected}"))
            .with_code(ErrorCode::E101)
            .with_label(self.end_span(), ErrorCode::E101.description())
    }

    fn unexpected(token: &PositionedToken<'_>, expected: &str) -> Diagnostic {
        Diagnostic::error(format!(
            "unexpected {}, expected {expected}",
            token.token.describe()
        ))
        .with_code(ErrorCode::E100)
        .with_label(token.span, ErrorCode::E100.description())
    }

    /// Runs `f` one nesting level deeper, failing past [`MAX_DEPTH`].
    fn nested<T>(&mut self, span: Span, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(Diagnostic::error(format!(
                "expression is nested more than {MAX_DEPTH} levels deep"
            ))
            .with_code(ErrorCode::E105)
            .with_label(span, ErrorCode::E105.description()));
        }
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn expr(&mut self) -> Result<Expr> {
        let mut lhs = self.term()?;
        while let Some(op) = self.peek_token().and_then(|t| match t {
            Token::Plus => Some(BinaryOp::Add),
            Token::Minus => Some(BinaryOp::Sub),
            _ => None,
        }) {
            self.advance();
            let rhs = self.term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.peek_token().and_then(|t| match t {
            Token::Star => Some(BinaryOp::Mul),
            Token::Slash => Some(BinaryOp::Div),
            _ => None,
        }) {
            self.advance();
            let rhs = self.unary()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr> {
        match self.peek() {
            Some(PositionedToken {
                token: Token::Minus,
                span,
            }) => {
                self.advance();
                let inner = self.nested(*span, Self::unary)?;
                Ok(Expr::Neg(Box::new(inner)))
            }
            Some(PositionedToken {
                token: Token::Plus,
                span,
            }) => {
                self.advance();
                self.nested(*span, Self::unary)
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr> {
        let base = self.primary()?;
        match self.peek() {
            Some(PositionedToken {
                token: Token::Caret,
                span,
            }) => {
                self.advance();
                let exponent = self.nested(*span, Self::unary)?;
                Ok(Expr::Binary {
                    op: BinaryOp::Pow,
                    lhs: Box::new(base),
                    rhs: Box::new(exponent),
                })
            }
            _ => Ok(base),
        }
    }

    fn primary(&mut self) -> Result<Expr> {
        let Some(token) = self.advance() else {
            return Err(self.incomplete("a number, `x` or `(`"));
        };

        match token.token {
            Token::Number(value) => Ok(Expr::Number(value)),
            Token::LeftParen => {
                let inner = self.nested(token.span, Self::expr)?;
                self.close_paren(token.span)?;
                Ok(inner)
            }
            Token::Ident(name) => {
                if self.peek_token() == Some(Token::LeftParen) {
                    self.call(name, token.span)
                } else if name == ast::VARIABLE {
                    Ok(Expr::Variable)
                } else if let Some(value) = ast::constant(name) {
                    Ok(Expr::Number(value))
                } else if Function::from_name(name).is_some() {
                    Err(Diagnostic::error(format!("function `{name}` must be called"))
                        .with_code(ErrorCode::E100)
                        .with_label(token.span, "missing argument list")
                        .with_help(format!("write `{name}(x)`")))
                } else {
                    Err(Diagnostic::error(format!("unknown identifier `{name}`"))
                        .with_code(ErrorCode::E103)
                        .with_label(token.span, ErrorCode::E103.description())
                        .with_help("the only variable is `x`; constants are `pi` and `e`"))
                }
            }
            _ => Err(Self::unexpected(token, "a number, `x` or `(`")),
        }
    }

    fn call(&mut self, name: &str, name_span: Span) -> Result<Expr> {
        let Some(function) = Function::from_name(name) else {
            return Err(Diagnostic::error(format!("unknown function `{name}`"))
                .with_code(ErrorCode::E102)
                .with_label(name_span, ErrorCode::E102.description())
                .with_help(format!(
                    "available functions: {}",
                    Function::NAMES.join(", ")
                )));
        };

        let open = match self.advance() {
            Some(token) => token.span,
            None => return Err(self.incomplete("`(`")),
        };

        let args = self.nested(open, |p| {
            let mut args = vec![p.expr()?];
            while p.peek_token() == Some(Token::Comma) {
                p.advance();
                args.push(p.expr()?);
            }
            Ok(args)
        })?;
        let close = self.close_paren(open)?;

        if args.len() != function.arity() {
            let plural = if function.arity() == 1 { "" } else { "s" };
            return Err(Diagnostic::error(format!(
                "function `{name}` takes {} argument{plural} but {} were supplied",
                function.arity(),
                args.len()
            ))
            .with_code(ErrorCode::E104)
            .with_label(name_span.union(close), ErrorCode::E104.description()));
        }

        Ok(Expr::Call { function, args })
    }

    /// Consumes a `)` matching the `(` at `open`, returning its span.
    fn close_paren(&mut self, open: Span) -> Result<Span> {
        match self.advance() {
            Some(PositionedToken {
                token: Token::RightParen,
                span,
            }) => Ok(*span),
            Some(token) => Err(Self::unexpected(token, "`)`")
                .with_secondary_label(open, "to close this parenthesis")),
            None => Err(self
                .incomplete("`)`")
                .with_secondary_label(open, "unclosed parenthesis")),
        }
    }
}

/// Parses a token stream into an expression tree.
///
/// `source_len` is the byte length of the expression text; it anchors
/// end-of-input diagnostics.
pub fn parse(tokens: &[PositionedToken<'_>], source_len: usize) -> Result<Expr> {
    if tokens.len() > MAX_TOKENS {
        let span = tokens[MAX_TOKENS].span.union(Span::new(source_len..source_len));
        return Err(Diagnostic::error(format!(
            "expression has {} tokens, the limit is {MAX_TOKENS}",
            tokens.len()
        ))
        .with_code(ErrorCode::E105)
        .with_label(span, ErrorCode::E105.description()));
    }

    if tokens.is_empty() {
        return Err(Diagnostic::error("empty expression")
            .with_code(ErrorCode::E101)
            .with_label(Span::new(0..source_len), ErrorCode::E101.description())
            .with_help("write a function of `x`, for example `sin(x)`"));
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        source_len,
    };
    let expr = parser.expr()?;

    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(Parser::unexpected(token, "an operator or end of expression")),
    }
}
