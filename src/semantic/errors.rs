//! Semantic error types
//!
//! Semantic errors never stop analysis. The check that found one fails, the
//! failure propagates upward as `false`, and traversal carries on so a single
//! run reports every independent problem.

use crate::parser::ast::SourceLocation;
use thiserror::Error;

/// Semantic error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticErrorKind {
    UndeclaredVariable,
    RedeclaredVariable,
    /// Reserved; the language has a single integer type.
    TypeMismatch,
    UninitializedVariable,
    InvalidOperation,
    /// Reserved for rules without a dedicated category.
    Generic,
}

/// A semantic diagnostic: what went wrong, about which name, and where
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Semantic error at line {}: {}", .location.line, describe(.kind, .name))]
pub struct SemanticError {
    pub kind: SemanticErrorKind,
    /// Variable or callee name the error is about
    pub name: String,
    pub location: SourceLocation,
}

impl SemanticError {
    pub fn new(kind: SemanticErrorKind, name: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            name: name.into(),
            location,
        }
    }

    pub fn line(&self) -> usize {
        self.location.line
    }
}

fn describe(kind: &SemanticErrorKind, name: &str) -> String {
    match kind {
        SemanticErrorKind::UndeclaredVariable => format!("Undeclared variable '{name}'"),
        SemanticErrorKind::RedeclaredVariable => {
            format!("Variable '{name}' already declared in this scope")
        }
        SemanticErrorKind::TypeMismatch => format!("Type mismatch involving '{name}'"),
        SemanticErrorKind::UninitializedVariable => {
            format!("Variable '{name}' used without initialization")
        }
        SemanticErrorKind::InvalidOperation => format!("Invalid operation involving '{name}'"),
        SemanticErrorKind::Generic => format!("Generic semantic error with '{name}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = SemanticError::new(
            SemanticErrorKind::UninitializedVariable,
            "x",
            SourceLocation::new(3, 7),
        );
        assert_eq!(
            err.to_string(),
            "Semantic error at line 3: Variable 'x' used without initialization"
        );

        let err = SemanticError::new(
            SemanticErrorKind::RedeclaredVariable,
            "y",
            SourceLocation::new(1, 5),
        );
        assert_eq!(
            err.to_string(),
            "Semantic error at line 1: Variable 'y' already declared in this scope"
        );
    }
}
