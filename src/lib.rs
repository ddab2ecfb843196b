//! # Introduction
//!
//! teachlang is the front end for a small imperative teaching language: a
//! single `int` type, block scoping, `if`/`else`, `while`, `repeat ... until`,
//! `print`, and one built-in function.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Semantic analysis → Symbol table
//! ```
//!
//! 1. [`parser`] tokenises the source and builds an AST. Syntax errors are
//!    collected with statement-level recovery; if any occur no AST is returned.
//! 2. [`semantic`] walks the AST with a scoped symbol table and reports
//!    undeclared, redeclared and uninitialized variables and invalid calls.
//!
//! [`check_source`] runs both stages.
//!
//! ## Example
//!
//! ```
//! let (program, symbols) = teachlang::check_source("int x = 3; print factorial(x);").unwrap();
//! assert_eq!(program.len(), 2);
//! assert!(symbols.find("x").unwrap().initialized);
//! ```

pub mod parser;
pub mod semantic;

use parser::ast::Program;
use parser::ParseError;
use semantic::{SemanticError, SymbolTable};
use thiserror::Error;

/// Why a source file was rejected
#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("{} syntax error(s)", .0.len())]
    Syntax(Vec<ParseError>),

    #[error("{} semantic error(s)", .0.len())]
    Semantic(Vec<SemanticError>),
}

impl FrontendError {
    /// Individual diagnostics, one rendered message per error.
    pub fn messages(&self) -> Vec<String> {
        match self {
            FrontendError::Syntax(errors) => errors.iter().map(ToString::to_string).collect(),
            FrontendError::Semantic(errors) => errors.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Parse and analyze `source`.
///
/// Semantic analysis only runs when parsing succeeded.
pub fn check_source(source: &str) -> Result<(Program, SymbolTable), FrontendError> {
    let program = parser::parse(source).map_err(FrontendError::Syntax)?;
    tracing::info!(statements = program.len(), "parsed");

    let symbols = semantic::analyze(&program).map_err(FrontendError::Semantic)?;
    tracing::info!(symbols = symbols.len(), "semantic analysis passed");

    Ok((program, symbols))
}
