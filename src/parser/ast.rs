// AST (Abstract Syntax Tree) definitions for the teaching language

use std::mem;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Binary operators
///
/// Arithmetic operators come from `expr`/`term`, comparison operators from
/// `bool_expr`. There are no logical operators in the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    // Comparison
    Lt,
    Gt,
    Eq,
    Ne,
}

impl BinOp {
    /// The operator lexeme as written in source.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(self, BinOp::Lt | BinOp::Gt | BinOp::Eq | BinOp::Ne)
    }

    /// Additive operators (`+`, `-`), lowest arithmetic precedence.
    pub(crate) fn additive(lexeme: &str) -> Option<Self> {
        match lexeme {
            "+" => Some(BinOp::Add),
            "-" => Some(BinOp::Sub),
            _ => None,
        }
    }

    /// Multiplicative operators (`*`, `/`).
    pub(crate) fn multiplicative(lexeme: &str) -> Option<Self> {
        match lexeme {
            "*" => Some(BinOp::Mul),
            "/" => Some(BinOp::Div),
            _ => None,
        }
    }

    /// Comparison operators, matched literally against the lexeme.
    pub(crate) fn comparison(lexeme: &str) -> Option<Self> {
        match lexeme {
            "<" => Some(BinOp::Lt),
            ">" => Some(BinOp::Gt),
            "==" => Some(BinOp::Eq),
            "!=" => Some(BinOp::Ne),
            _ => None,
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number {
        value: i64,
        location: SourceLocation,
    },
    Identifier {
        name: String,
        location: SourceLocation,
    },
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
    /// Single-argument call. Whether the callee names the built-in is decided
    /// by semantic analysis, not by the grammar.
    FuncCall {
        callee: Box<Expr>,
        argument: Box<Expr>,
        location: SourceLocation,
    },
}

impl Expr {
    /// Get the source location of this expression
    pub fn location(&self) -> &SourceLocation {
        match self {
            Expr::Number { location, .. } => location,
            Expr::Identifier { location, .. } => location,
            Expr::BinaryOp { location, .. } => location,
            Expr::FuncCall { location, .. } => location,
        }
    }

    /// Moves this node's boxed children into `pending`, leaving leaves behind.
    fn take_children(&mut self, pending: &mut Vec<Expr>) {
        match self {
            Expr::BinaryOp { left, right, .. } => {
                pending.push(mem::replace(left.as_mut(), Expr::hollow()));
                pending.push(mem::replace(right.as_mut(), Expr::hollow()));
            }
            Expr::FuncCall {
                callee, argument, ..
            } => {
                pending.push(mem::replace(callee.as_mut(), Expr::hollow()));
                pending.push(mem::replace(argument.as_mut(), Expr::hollow()));
            }
            Expr::Number { .. } | Expr::Identifier { .. } => {}
        }
    }

    fn hollow() -> Expr {
        Expr::Number {
            value: 0,
            location: SourceLocation::default(),
        }
    }
}

// Left-chained operators (`1 + 1 + 1 + ...`) nest arbitrarily deep on the left,
// so teardown walks an explicit work-list instead of recursing.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.take_children(&mut pending);
        }
    }
}

/// A braced statement sequence; opens a new scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub location: SourceLocation,
}

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl {
        name: String,
        init: Option<Expr>,
        location: SourceLocation,
    },
    Assign {
        target: String,
        value: Expr,
        location: SourceLocation,
    },
    Print {
        expr: Expr,
        location: SourceLocation,
    },
    If {
        condition: Expr,
        then_block: Block,
        else_block: Option<Block>,
        location: SourceLocation,
    },
    While {
        condition: Expr,
        body: Block,
        location: SourceLocation,
    },
    /// `repeat { body } until (condition);` runs the body before testing.
    Repeat {
        body: Block,
        condition: Expr,
        location: SourceLocation,
    },
    Block(Block),
}

impl Stmt {
    /// Get the source location of this statement
    pub fn location(&self) -> &SourceLocation {
        match self {
            Stmt::VarDecl { location, .. } => location,
            Stmt::Assign { location, .. } => location,
            Stmt::Print { location, .. } => location,
            Stmt::If { location, .. } => location,
            Stmt::While { location, .. } => location,
            Stmt::Repeat { location, .. } => location,
            Stmt::Block(block) => &block.location,
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>, // Top-level statements in source order
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
