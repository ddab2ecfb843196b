//! Semantic analysis
//!
//! Runs after a successful parse and checks what the grammar cannot:
//! - [`symbols`]: scope-tagged symbol table with shadowing
//! - [`analyzer`]: the AST walk that declares, resolves and checks names
//! - [`errors`]: semantic diagnostics
//!
//! Analysis is total: it keeps going after an error and returns every
//! diagnostic it found, in traversal order.

pub mod analyzer;
pub mod errors;
pub mod symbols;

pub use analyzer::{analyze, Analyzer, BUILTIN_FUNCTION};
pub use errors::{SemanticError, SemanticErrorKind};
pub use symbols::{Symbol, SymbolTable, SymbolType};
