//! Scope-tagged symbol table
//!
//! Symbols live in one flat list in declaration order. Lookups scan it from
//! the most recent declaration backwards, so the innermost visible declaration
//! of a name is always found first; that is all shadowing needs.
//!
//! Leaving a scope must purge that scope's symbols *before* the level is
//! decremented ([`SymbolTable::leave_scope`] does both). Skipping the purge
//! would leave inner declarations visible to the enclosing code.

use std::fmt;

/// Declared type of a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolType {
    Int,
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolType::Int => write!(f, "int"),
        }
    }
}

/// A declared variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub ty: SymbolType,
    /// Nesting depth at declaration, 0 = outermost
    pub scope_level: usize,
    pub line_declared: usize,
    pub initialized: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    current_scope: usize,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Add a symbol at the current scope level.
    ///
    /// Does not check for duplicates; query [`find_in_current_scope`] first.
    ///
    /// [`find_in_current_scope`]: SymbolTable::find_in_current_scope
    pub fn declare(&mut self, name: &str, ty: SymbolType, line: usize) -> &mut Symbol {
        tracing::trace!(name, scope = self.current_scope, line, "declare");
        self.symbols.push(Symbol {
            name: name.to_string(),
            ty,
            scope_level: self.current_scope,
            line_declared: line,
            initialized: false,
        });
        let last = self.symbols.len() - 1;
        &mut self.symbols[last]
    }

    /// The innermost visible symbol named `name`.
    pub fn find(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().rev().find(|sym| sym.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.symbols.iter_mut().rev().find(|sym| sym.name == name)
    }

    /// Like [`find`](SymbolTable::find), restricted to the current scope level.
    pub fn find_in_current_scope(&self, name: &str) -> Option<&Symbol> {
        let level = self.current_scope;
        self.symbols
            .iter()
            .rev()
            .find(|sym| sym.name == name && sym.scope_level == level)
    }

    pub fn current_scope(&self) -> usize {
        self.current_scope
    }

    pub fn enter_scope(&mut self) {
        self.current_scope += 1;
    }

    /// Step out one level. Never goes below the outermost scope.
    pub fn exit_scope(&mut self) {
        self.current_scope = self.current_scope.saturating_sub(1);
    }

    /// Remove every symbol declared at the current scope level.
    pub fn purge_current_scope(&mut self) {
        let level = self.current_scope;
        self.symbols.retain(|sym| sym.scope_level != level);
    }

    /// Purge the current scope, then exit it.
    pub fn leave_scope(&mut self) {
        self.purge_current_scope();
        self.exit_scope();
    }

    /// Symbols in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Human-readable listing of every symbol, oldest first.
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== SYMBOL TABLE DUMP ==")?;
        writeln!(f, "Total symbols: {}\n", self.symbols.len())?;

        for (index, sym) in self.symbols.iter().enumerate() {
            writeln!(f, "Symbol[{index}]:")?;
            writeln!(f, "  Name: {}", sym.name)?;
            writeln!(f, "  Type: {}", sym.ty)?;
            writeln!(f, "  Scope Level: {}", sym.scope_level)?;
            writeln!(f, "  Line Declared: {}", sym.line_declared)?;
            let initialized = if sym.initialized { "Yes" } else { "No" };
            writeln!(f, "  Initialized: {initialized}\n")?;
        }

        writeln!(f, "===================")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_find() {
        let mut table = SymbolTable::new();
        table.declare("x", SymbolType::Int, 1);

        let sym = table.find("x").unwrap();
        assert_eq!(sym.scope_level, 0);
        assert_eq!(sym.line_declared, 1);
        assert!(!sym.initialized);
        assert!(table.find("y").is_none());
    }

    #[test]
    fn test_shadowing_finds_innermost() {
        let mut table = SymbolTable::new();
        table.declare("x", SymbolType::Int, 1).initialized = true;
        table.enter_scope();
        table.declare("x", SymbolType::Int, 2);

        let inner = table.find("x").unwrap();
        assert_eq!(inner.scope_level, 1);
        assert!(!inner.initialized);

        table.leave_scope();
        let outer = table.find("x").unwrap();
        assert_eq!(outer.scope_level, 0);
        assert!(outer.initialized);
    }

    #[test]
    fn test_find_in_current_scope() {
        let mut table = SymbolTable::new();
        table.declare("x", SymbolType::Int, 1);
        table.enter_scope();

        assert!(table.find("x").is_some());
        assert!(table.find_in_current_scope("x").is_none());

        table.declare("x", SymbolType::Int, 3);
        assert_eq!(table.find_in_current_scope("x").unwrap().line_declared, 3);
    }

    #[test]
    fn test_purge_only_current_scope() {
        let mut table = SymbolTable::new();
        table.declare("a", SymbolType::Int, 1);
        table.enter_scope();
        table.declare("b", SymbolType::Int, 2);
        table.declare("c", SymbolType::Int, 3);

        table.purge_current_scope();
        assert_eq!(table.len(), 1);
        assert_eq!(table.current_scope(), 1);
        assert!(table.find("b").is_none());
        assert!(table.find("a").is_some());
    }

    #[test]
    fn test_exit_scope_stops_at_zero() {
        let mut table = SymbolTable::new();
        table.exit_scope();
        assert_eq!(table.current_scope(), 0);
    }

    #[test]
    fn test_dump_lists_in_declaration_order() {
        let mut table = SymbolTable::new();
        table.declare("first", SymbolType::Int, 1).initialized = true;
        table.declare("second", SymbolType::Int, 2);

        let dump = table.dump();
        assert!(dump.starts_with("== SYMBOL TABLE DUMP ==\nTotal symbols: 2\n"));
        let first = dump.find("Name: first").unwrap();
        let second = dump.find("Name: second").unwrap();
        assert!(first < second);
        assert!(dump.contains("Symbol[0]:\n  Name: first\n  Type: int\n  Scope Level: 0\n  Line Declared: 1\n  Initialized: Yes"));
    }
}
