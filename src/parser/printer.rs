//! Debug rendering of the AST
//!
//! `Program` implements [`Display`](fmt::Display) as an indented tree, two
//! spaces per level, children listed under their parent in source order:
//!
//! ```text
//! Program
//!   VarDecl: x
//!     Number: 5
//!   Print Statement
//!     BinaryOp: +
//!       Identifier: x
//!       Number: 1
//! ```

use crate::parser::ast::*;
use std::fmt;

enum Node<'a> {
    Stmt(&'a Stmt),
    Expr(&'a Expr),
    Block(&'static str, &'a Block),
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Program")?;

        let mut stack: Vec<(Node<'_>, usize)> = self
            .statements
            .iter()
            .rev()
            .map(|stmt| (Node::Stmt(stmt), 1))
            .collect();

        while let Some((node, level)) = stack.pop() {
            write!(f, "{:width$}", "", width = level * 2)?;

            // Children are pushed last-first so they pop in source order
            let mut children: Vec<Node<'_>> = Vec::new();
            match node {
                Node::Stmt(stmt) => match stmt {
                    Stmt::VarDecl { name, init, .. } => {
                        writeln!(f, "VarDecl: {name}")?;
                        children.extend(init.iter().map(Node::Expr));
                    }
                    Stmt::Assign { target, value, .. } => {
                        writeln!(f, "Assign: {target}")?;
                        children.push(Node::Expr(value));
                    }
                    Stmt::Print { expr, .. } => {
                        writeln!(f, "Print Statement")?;
                        children.push(Node::Expr(expr));
                    }
                    Stmt::If {
                        condition,
                        then_block,
                        else_block,
                        ..
                    } => {
                        writeln!(f, "If Statement")?;
                        children.push(Node::Expr(condition));
                        children.push(Node::Block("Block", then_block));
                        if let Some(else_block) = else_block {
                            children.push(Node::Block("Else", else_block));
                        }
                    }
                    Stmt::While {
                        condition, body, ..
                    } => {
                        writeln!(f, "While Loop")?;
                        children.push(Node::Expr(condition));
                        children.push(Node::Block("Block", body));
                    }
                    Stmt::Repeat {
                        body, condition, ..
                    } => {
                        writeln!(f, "Repeat-Until Loop")?;
                        children.push(Node::Block("Block", body));
                        children.push(Node::Expr(condition));
                    }
                    Stmt::Block(block) => {
                        writeln!(f, "Block")?;
                        children.extend(block.statements.iter().map(Node::Stmt));
                    }
                },
                Node::Block(label, block) => {
                    writeln!(f, "{label}")?;
                    children.extend(block.statements.iter().map(Node::Stmt));
                }
                Node::Expr(expr) => match expr {
                    Expr::Number { value, .. } => writeln!(f, "Number: {value}")?,
                    Expr::Identifier { name, .. } => writeln!(f, "Identifier: {name}")?,
                    Expr::BinaryOp {
                        op, left, right, ..
                    } => {
                        writeln!(f, "BinaryOp: {}", op.symbol())?;
                        children.push(Node::Expr(left));
                        children.push(Node::Expr(right));
                    }
                    Expr::FuncCall {
                        callee, argument, ..
                    } => {
                        if let Expr::Identifier { name, .. } = &**callee {
                            writeln!(f, "Function Call: {name}")?;
                        } else {
                            writeln!(f, "Function Call")?;
                            children.push(Node::Expr(callee));
                        }
                        children.push(Node::Expr(argument));
                    }
                },
            }

            stack.extend(children.into_iter().rev().map(|child| (child, level + 1)));
        }

        Ok(())
    }
}
