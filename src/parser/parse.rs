//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, error recovery, and the main parse
//! entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: Parsing statements (declarations, assignments, `if`, loops, blocks)
//! - `expressions`: Parsing expressions with precedence climbing
//!
//! # Error recovery
//!
//! A syntax error inside a statement is recorded and the parser synchronizes:
//! tokens are discarded until a `;` has been consumed or a `}` (or end of input)
//! is next. Parsing then resumes with the following statement, so one run
//! reports every independent syntax error. If anything was recorded, no AST is
//! returned.
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::ast::*;
use crate::parser::lexer::{LexErrorKind, Lexer, Token, TokenKind};
use thiserror::Error;

/// Syntax error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnexpectedToken,
    MissingSemicolon,
    MissingIdentifier,
    MissingEquals,
    InvalidExpression,
    MissingLParen,
    MissingRParen,
    MissingBlock,
    InvalidOperator,
    FunctionCallError,
    /// The lexer produced an error token where the parser needed a real one.
    Lexical(LexErrorKind),
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at line {}, column {}: {message}", .location.line, .location.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    /// Text of the offending token
    pub lexeme: String,
    pub location: SourceLocation,
}

impl ParseError {
    /// Build an error anchored at `token`.
    ///
    /// Lexical error tokens take precedence over `kind`: the real problem is
    /// the malformed token, not the construct that tripped over it. Likewise an
    /// operator where something else was expected is reported as an invalid
    /// operator.
    pub(crate) fn at(token: &Token, kind: ParseErrorKind, expected: &str) -> Self {
        let (kind, message) = match token.kind {
            TokenKind::Error(lex) => (
                ParseErrorKind::Lexical(lex),
                format!(
                    "{} '{}' ({})",
                    capitalize(&lex.to_string()),
                    token.lexeme,
                    expected
                ),
            ),
            TokenKind::Operator => (
                ParseErrorKind::InvalidOperator,
                format!("Invalid operator '{}' ({})", token.lexeme, expected),
            ),
            _ => (kind, format!("{}, found {}", expected, token)),
        };

        ParseError {
            kind,
            message,
            lexeme: token.lexeme.clone(),
            location: token.location,
        }
    }

    /// Name the construct whose header failed, e.g. `'if' condition`.
    pub(crate) fn in_context(mut self, context: &str) -> Self {
        self.message = format!("{} (in {})", self.message, context);
        self
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Recursive descent parser for the teaching language
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        let mut lexer = Lexer::new(source);
        Self {
            tokens: lexer.tokenize(),
            position: 0,
            errors: Vec::new(),
        }
    }

    /// Discard all state and start over on `source`.
    pub fn reset(&mut self, source: &str) {
        *self = Parser::new(source);
    }

    /// Parse the entire program (top-level statements)
    ///
    /// Returns every syntax error found if there was at least one.
    pub fn parse_program(&mut self) -> Result<Program, Vec<ParseError>> {
        let mut program = Program::new();

        while !self.is_at_end() {
            // Nothing at top level closes on '}'
            if self.check(TokenKind::RBrace) {
                self.report_unmatched_brace();
                continue;
            }
            if let Some(stmt) = self.parse_statement_recovering() {
                program.statements.push(stmt);
            }
        }

        if self.errors.is_empty() {
            tracing::debug!(statements = program.len(), "parsed program");
            Ok(program)
        } else {
            tracing::debug!(errors = self.errors.len(), "parse failed");
            Err(std::mem::take(&mut self.errors))
        }
    }

    /// Parse one statement; on failure record the error and synchronize.
    pub(crate) fn parse_statement_recovering(&mut self) -> Option<Stmt> {
        match self.parse_statement() {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                tracing::debug!(line = err.location.line, "{}", err.message);
                self.errors.push(err);
                self.synchronize();
                None
            }
        }
    }

    /// Record and consume a `}` that closes no open block.
    fn report_unmatched_brace(&mut self) {
        let token = self.advance();
        let error = ParseError {
            kind: ParseErrorKind::MissingBlock,
            message: "Unmatched '}'".to_string(),
            lexeme: token.lexeme.clone(),
            location: token.location,
        };
        tracing::debug!(line = error.location.line, "{}", error.message);
        self.errors.push(error);
    }

    /// Skip to the next statement boundary.
    ///
    /// A `;` is consumed; a `}` is left for the enclosing block to close. A
    /// block opened while skipping is skipped whole, up to its own `}`.
    pub(crate) fn synchronize(&mut self) {
        let start = self.position;
        let mut depth = 0usize;

        while !self.is_at_end() {
            match self.peek().kind {
                TokenKind::Semicolon if depth == 0 => {
                    self.advance();
                    break;
                }
                TokenKind::RBrace if depth == 0 => break,
                TokenKind::RBrace => {
                    self.advance();
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                TokenKind::LBrace => {
                    self.advance();
                    depth += 1;
                }
                _ => {
                    self.advance();
                }
            }
        }

        tracing::trace!(skipped = self.position - start, "synchronized");
    }

    // ===== Helper methods =====

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume an operator token whose lexeme satisfies `classify`.
    pub(crate) fn match_operator(&mut self, classify: fn(&str) -> Option<BinOp>) -> Option<BinOp> {
        let token = self.peek();
        if token.kind != TokenKind::Operator {
            return None;
        }
        let op = classify(&token.lexeme)?;
        self.advance();
        Some(op)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    pub(crate) fn error_here(&self, kind: ParseErrorKind, expected: &str) -> ParseError {
        ParseError::at(self.peek(), kind, expected)
    }

    pub(crate) fn expect_token(
        &mut self,
        token: TokenKind,
        kind: ParseErrorKind,
        message: &str,
    ) -> Result<(), ParseError> {
        if self.match_token(token) {
            Ok(())
        } else {
            Err(self.error_here(kind, message))
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            TokenKind::LParen,
            ParseErrorKind::MissingLParen,
            &format!("Expected '(' {ctx}"),
        )
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            TokenKind::RParen,
            ParseErrorKind::MissingRParen,
            &format!("Expected ')' {ctx}"),
        )
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            TokenKind::Semicolon,
            ParseErrorKind::MissingSemicolon,
            &format!("Expected ';' {ctx}"),
        )
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<String, ParseError> {
        if self.check(TokenKind::Identifier) {
            Ok(self.advance().lexeme.clone())
        } else {
            Err(self.error_here(
                ParseErrorKind::MissingIdentifier,
                &format!("Expected identifier {ctx}"),
            ))
        }
    }
}

/// Parse `source` into a [`Program`], collecting every syntax error.
pub fn parse(source: &str) -> Result<Program, Vec<ParseError>> {
    Parser::new(source).parse_program()
}
