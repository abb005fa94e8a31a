//! Shared IR for the Nexus runtime.
//!
//! Holds the types that flow between pipeline stages: [`Token`] streams
//! produced by the lexer and the statement tree ([`Program`], [`Stmt`],
//! [`Expr`]) produced by the parser and walked by the evaluator.
//!
//! Nodes are owned exclusively by the tree that contains them and are
//! never mutated after construction.

mod ast;
mod token;

pub use ast::{Expr, Program, Stmt};
pub use token::{Token, TokenKind};
