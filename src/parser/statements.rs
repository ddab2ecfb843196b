//! Statement parsing implementation
//!
//! This module handles parsing of every statement form in the language:
//!
//! - Variable declarations: `int x = 42;`
//! - Assignments: `x = x + 1;`
//! - Control flow: `if`/`else`, `while`, `repeat ... until`
//! - Output: `print expr;`
//! - Compound statements: `{ ... }`
//!
//! # Grammar
//!
//! ```text
//! statement   ::= vardecl | assignment | if_stmt | while_stmt
//!               | repeat_stmt | print_stmt | block
//! vardecl     ::= "int" IDENT ("=" expr)? ";"
//! assignment  ::= IDENT "=" expr ";"
//! if_stmt     ::= "if" "(" bool_expr ")" block ("else" block)?
//! while_stmt  ::= "while" "(" bool_expr ")" block
//! repeat_stmt ::= "repeat" block "until" "(" bool_expr ")" ";"
//! print_stmt  ::= "print" expr ";"
//! block       ::= "{" statement* "}"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};

impl Parser {
    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        tracing::trace!(line = self.current_location().line, token = %self.peek(), "statement");

        match self.peek().kind {
            TokenKind::Int => self.parse_declaration(),
            TokenKind::Identifier => self.parse_assignment(),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Repeat => self.parse_repeat_statement(),
            TokenKind::Print => self.parse_print_statement(),
            TokenKind::LBrace => Ok(Stmt::Block(self.parse_block()?)),
            _ => Err(self.error_here(ParseErrorKind::UnexpectedToken, "Expected a statement")),
        }
    }

    /// Parse a braced block. Statements that fail inside it are recorded and
    /// skipped so the rest of the block is still parsed.
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let location = self.current_location();
        self.expect_token(
            TokenKind::LBrace,
            ParseErrorKind::MissingBlock,
            "Expected '{' to open block",
        )?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if let Some(stmt) = self.parse_statement_recovering() {
                statements.push(stmt);
            }
        }

        self.expect_token(
            TokenKind::RBrace,
            ParseErrorKind::MissingBlock,
            "Expected '}' to close block",
        )?;

        Ok(Block {
            statements,
            location,
        })
    }

    /// Parse variable declaration: int name [= init];
    fn parse_declaration(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // consume 'int'

        let location = self.current_location();
        let name = self.expect_identifier("after 'int'")?;

        let init = if self.match_token(TokenKind::Equals) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect_semicolon("at end of declaration")?;

        Ok(Stmt::VarDecl {
            name,
            init,
            location,
        })
    }

    /// Parse assignment: name = expr;
    fn parse_assignment(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        let target = self.advance().lexeme.clone();

        self.expect_token(
            TokenKind::Equals,
            ParseErrorKind::MissingEquals,
            &format!("Expected '=' after identifier '{target}'"),
        )?;
        let value = self.parse_expression()?;
        self.expect_semicolon("after assignment")?;

        Ok(Stmt::Assign {
            target,
            value,
            location,
        })
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.advance(); // consume 'if'

        self.expect_lparen("after 'if'")?;
        let condition = self
            .parse_bool_expression()
            .map_err(|err| err.in_context("'if' condition"))?;
        self.expect_rparen("after if condition")?;

        let then_block = self.parse_block()?;

        let else_block = if self.match_token(TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_block,
            else_block,
            location,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.advance(); // consume 'while'

        self.expect_lparen("after 'while'")?;
        let condition = self
            .parse_bool_expression()
            .map_err(|err| err.in_context("'while' condition"))?;
        self.expect_rparen("after while condition")?;

        let body = self.parse_block()?;

        Ok(Stmt::While {
            condition,
            body,
            location,
        })
    }

    /// Parse repeat-until statement
    fn parse_repeat_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.advance(); // consume 'repeat'

        let body = self.parse_block()?;

        self.expect_token(
            TokenKind::Until,
            ParseErrorKind::UnexpectedToken,
            "Expected 'until' after repeat block",
        )?;
        self.expect_lparen("after 'until'")?;
        let condition = self
            .parse_bool_expression()
            .map_err(|err| err.in_context("'until' condition"))?;
        self.expect_rparen("after repeat condition")?;
        self.expect_semicolon("after repeat statement")?;

        Ok(Stmt::Repeat {
            body,
            condition,
            location,
        })
    }

    /// Parse print statement
    fn parse_print_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.advance(); // consume 'print'

        let expr = self.parse_expression()?;
        self.expect_semicolon("after print statement")?;

        Ok(Stmt::Print { expr, location })
    }
}
