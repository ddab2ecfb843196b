//! Expression parsing implementation
//!
//! This module handles parsing of expressions using precedence climbing for
//! binary operators and recursive descent for primary expressions.
//!
//! # Precedence (low to high)
//!
//! ```text
//! bool_expr ::= expr (("<" | ">" | "==" | "!=") expr)*
//! expr      ::= term (("+" | "-") term)*
//! term      ::= factor (("*" | "/") factor)*
//! factor    ::= NUMBER | IDENT ("(" expr ")")? | "(" expr ")"
//! ```
//!
//! Every level is left-associative. Comparisons only appear where the grammar
//! asks for a `bool_expr` (conditions of `if`, `while` and `until`).
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};

impl Parser {
    /// Parse a condition: arithmetic operands joined by comparison operators
    pub(crate) fn parse_bool_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Parser::parse_expression, BinOp::comparison)
    }

    /// Parse expression (additive level)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Parser::parse_term, BinOp::additive)
    }

    /// Parse term (multiplicative level)
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Parser::parse_factor, BinOp::multiplicative)
    }

    /// One precedence level: `operand (op operand)*`, folded to the left.
    fn parse_binary_level(
        &mut self,
        operand: fn(&mut Parser) -> Result<Expr, ParseError>,
        classify: fn(&str) -> Option<BinOp>,
    ) -> Result<Expr, ParseError> {
        let mut node = operand(self)?;

        while let Some(op) = self.match_operator(classify) {
            let location = self.previous().location;
            let right = operand(self)?;
            node = Expr::BinaryOp {
                op,
                left: Box::new(node),
                right: Box::new(right),
                location,
            };
        }

        Ok(node)
    }

    /// Parse primary expression: literal, variable, call or parenthesized expression
    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        match self.peek().kind {
            TokenKind::Number => {
                let token = self.advance().clone();
                let value = token.lexeme.parse::<i64>().map_err(|_| {
                    ParseError::at(
                        &token,
                        ParseErrorKind::InvalidExpression,
                        "Expected integer literal",
                    )
                })?;
                Ok(Expr::Number {
                    value,
                    location: token.location,
                })
            }
            TokenKind::Identifier => {
                let token = self.advance().clone();
                if self.check(TokenKind::LParen) {
                    self.parse_function_call(token.lexeme, token.location)
                } else {
                    Ok(Expr::Identifier {
                        name: token.lexeme,
                        location: token.location,
                    })
                }
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_rparen("to close parenthesized expression")?;
                Ok(expr)
            }
            _ => Err(self.error_here(
                ParseErrorKind::InvalidExpression,
                "Expected number, identifier, or '(' in expression",
            )),
        }
    }

    /// Parse a single-argument call: name ( expr )
    fn parse_function_call(
        &mut self,
        name: String,
        location: SourceLocation,
    ) -> Result<Expr, ParseError> {
        self.advance(); // consume '('

        if self.check(TokenKind::RParen) {
            return Err(self.error_here(
                ParseErrorKind::FunctionCallError,
                &format!("Expected an argument in call to '{name}'"),
            ));
        }

        let argument = self.parse_expression()?;
        self.expect_token(
            TokenKind::RParen,
            ParseErrorKind::FunctionCallError,
            &format!("Expected ')' after argument to '{name}'"),
        )?;

        Ok(Expr::FuncCall {
            callee: Box::new(Expr::Identifier { name, location }),
            argument: Box::new(argument),
            location,
        })
    }
}
