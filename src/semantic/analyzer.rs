//! Semantic analysis over the parsed AST
//!
//! Walks the program top-down with a single [`SymbolTable`] and checks:
//!
//! - declaration before use, and no redeclaration within one scope
//! - variables are initialized before they are read
//! - calls name the built-in function
//!
//! Every statement is visited even after a failure, and both operands of a
//! binary operator are always checked, so one run reports every independent
//! error. Repeated "undeclared variable" reports for the same name are
//! suppressed after the first.

use crate::parser::ast::*;
use crate::semantic::errors::{SemanticError, SemanticErrorKind};
use crate::semantic::symbols::{SymbolTable, SymbolType};
use rustc_hash::FxHashSet;

/// The only function a program may call.
pub const BUILTIN_FUNCTION: &str = "factorial";

/// How many distinct undeclared names are remembered for de-duplication.
/// Past this, further undeclared names are reported on every use.
pub const MAX_REPORTED_NAMES: usize = 100;

#[derive(Debug, Default)]
pub struct Analyzer {
    table: SymbolTable,
    reported_undeclared: FxHashSet<String>,
    diagnostics: Vec<SemanticError>,
}

impl Analyzer {
    pub fn new() -> Self {
        Analyzer::default()
    }

    /// Check `program`, returning `true` if no semantic error was found.
    ///
    /// Each call starts from an empty symbol table. Diagnostics from the run
    /// are available from [`diagnostics`](Analyzer::diagnostics) afterwards.
    pub fn analyze(&mut self, program: &Program) -> bool {
        self.table = SymbolTable::new();
        self.reported_undeclared.clear();
        self.diagnostics.clear();

        let mut valid = true;
        for stmt in &program.statements {
            valid &= self.check_statement(stmt);
        }

        if valid {
            tracing::debug!(symbols = self.table.len(), "semantic analysis passed");
            tracing::debug!("\n{}", self.table.dump());
        } else {
            tracing::debug!(errors = self.diagnostics.len(), "semantic analysis failed");
        }

        valid
    }

    pub fn diagnostics(&self) -> &[SemanticError] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<SemanticError> {
        self.diagnostics
    }

    /// Symbols still in scope at the end of the last run (the outermost scope).
    pub fn symbols(&self) -> &SymbolTable {
        &self.table
    }

    fn check_statement(&mut self, stmt: &Stmt) -> bool {
        match stmt {
            Stmt::VarDecl {
                name,
                init,
                location,
            } => self.check_declaration(name, init.as_ref(), *location),
            Stmt::Assign {
                target,
                value,
                location,
            } => self.check_assignment(target, value, *location),
            Stmt::Print { expr, .. } => self.check_expression(expr),
            Stmt::If {
                condition,
                then_block,
                else_block,
                ..
            } => {
                let condition_ok = self.check_expression(condition);
                let then_ok = self.check_block(then_block);
                let else_ok = match else_block {
                    Some(block) => self.check_block(block),
                    None => true,
                };
                condition_ok & then_ok & else_ok
            }
            Stmt::While {
                condition, body, ..
            } => {
                let condition_ok = self.check_expression(condition);
                let body_ok = self.check_block(body);
                condition_ok & body_ok
            }
            // The condition sees the enclosing scope, not the body's declarations
            Stmt::Repeat {
                body, condition, ..
            } => {
                let body_ok = self.check_block(body);
                let condition_ok = self.check_expression(condition);
                body_ok & condition_ok
            }
            Stmt::Block(block) => self.check_block(block),
        }
    }

    fn check_declaration(
        &mut self,
        name: &str,
        init: Option<&Expr>,
        location: SourceLocation,
    ) -> bool {
        if self.table.find_in_current_scope(name).is_some() {
            self.report(SemanticError::new(
                SemanticErrorKind::RedeclaredVariable,
                name,
                location,
            ));
            if let Some(init) = init {
                self.check_expression(init);
            }
            return false;
        }

        // Declared before the initializer is checked: `int x = x;` reads an
        // uninitialized `x`, and an inner declaration shadows before its own
        // initializer runs.
        self.table.declare(name, SymbolType::Int, location.line);

        let Some(init) = init else {
            return true;
        };
        if !self.check_expression(init) {
            return false;
        }
        if let Some(symbol) = self.table.find_mut(name) {
            symbol.initialized = true;
        }
        true
    }

    fn check_assignment(&mut self, target: &str, value: &Expr, location: SourceLocation) -> bool {
        // Marked before the value is checked, so `x = x + 1;` reads `x` as
        // initialized.
        let declared = match self.table.find_mut(target) {
            Some(symbol) => {
                symbol.initialized = true;
                true
            }
            None => false,
        };
        if !declared {
            self.report_undeclared(target, location);
        }

        let value_ok = self.check_expression(value);
        declared && value_ok
    }

    /// Check every operand of `expr` in source order.
    ///
    /// Operator chains nest as deep as the expression is long, so the walk
    /// uses an explicit stack.
    fn check_expression(&mut self, expr: &Expr) -> bool {
        let mut valid = true;
        let mut pending = vec![expr];

        while let Some(expr) = pending.pop() {
            match expr {
                Expr::Number { .. } => {}
                Expr::Identifier { name, location } => {
                    valid &= self.check_identifier(name, *location);
                }
                Expr::BinaryOp { left, right, .. } => {
                    pending.push(right.as_ref());
                    pending.push(left.as_ref());
                }
                Expr::FuncCall {
                    callee,
                    argument,
                    location,
                } => {
                    valid &= self.check_callee(callee, *location);
                    pending.push(argument.as_ref());
                }
            }
        }

        valid
    }

    fn check_identifier(&mut self, name: &str, location: SourceLocation) -> bool {
        match self.table.find(name).map(|symbol| symbol.initialized) {
            None => {
                self.report_undeclared(name, location);
                false
            }
            Some(false) => {
                self.report(SemanticError::new(
                    SemanticErrorKind::UninitializedVariable,
                    name,
                    location,
                ));
                false
            }
            Some(true) => true,
        }
    }

    fn check_callee(&mut self, callee: &Expr, location: SourceLocation) -> bool {
        match callee {
            Expr::Identifier { name, .. } if name == BUILTIN_FUNCTION => true,
            Expr::Identifier { name, .. } => {
                self.report(SemanticError::new(
                    SemanticErrorKind::InvalidOperation,
                    name.as_str(),
                    location,
                ));
                false
            }
            _ => {
                self.report(SemanticError::new(
                    SemanticErrorKind::InvalidOperation,
                    "Invalid function call",
                    location,
                ));
                false
            }
        }
    }

    fn check_block(&mut self, block: &Block) -> bool {
        self.table.enter_scope();

        let mut valid = true;
        for stmt in &block.statements {
            valid &= self.check_statement(stmt);
        }

        self.table.leave_scope();
        valid
    }

    fn report_undeclared(&mut self, name: &str, location: SourceLocation) {
        if self.reported_undeclared.contains(name) {
            return;
        }
        if self.reported_undeclared.len() < MAX_REPORTED_NAMES {
            self.reported_undeclared.insert(name.to_string());
        }
        self.report(SemanticError::new(
            SemanticErrorKind::UndeclaredVariable,
            name,
            location,
        ));
    }

    fn report(&mut self, error: SemanticError) {
        tracing::debug!(line = error.line(), "{error}");
        self.diagnostics.push(error);
    }
}

/// Analyze `program` with a fresh [`Analyzer`].
///
/// On success returns the symbols left in the outermost scope.
pub fn analyze(program: &Program) -> Result<SymbolTable, Vec<SemanticError>> {
    let mut analyzer = Analyzer::new();
    if analyzer.analyze(program) {
        Ok(analyzer.table)
    } else {
        Err(analyzer.into_diagnostics())
    }
}
