//! Teaching-language source parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), with statement-level error recovery
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! - One type: `int`
//! - Statements: declarations, assignments, `print`, `if`/`else`, `while`,
//!   `repeat ... until`, blocks
//! - Expressions: `+ - * /`, comparisons `< > == !=` in conditions, and calls to
//!   the single built-in function
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod parse;

mod expressions;
mod printer;
mod statements;

pub use parse::{parse, ParseError, ParseErrorKind, Parser};
