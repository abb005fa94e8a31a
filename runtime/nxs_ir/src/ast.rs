//! Statement and expression tree for Nexus programs.
//!
//! The tree is produced once per load and retained for the lifetime of the
//! runtime instance. Each node carries only the fields the evaluator needs.

/// A parsed program: an ordered list of top-level statements.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Program {
    pub body: Vec<Stmt>,
}

impl Program {
    pub fn new(body: Vec<Stmt>) -> Self {
        Program { body }
    }
}

/// Statement forms, dispatched on the first token of each statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    /// `var|let|const NAME [= expr]`. Missing initializers default to null.
    VarDecl { name: String, value: Expr },
    /// `NAME = expr`. Also notifies watchers of `NAME`.
    Assign { name: String, value: Expr },
    /// `NAME(arg, ...)`.
    Call { callee: String, args: Vec<Expr> },
    /// `if expr { ... } [else { ... }]`.
    If {
        cond: Expr,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
    /// `func NAME(params) { ... }`.
    FuncDecl {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
    },
    /// `context NAME { ... }` — a named, isolated scope.
    Context { name: String, body: Vec<Stmt> },
    /// A markup subtree captured verbatim by the lexer, collected for the
    /// materializer and not otherwise evaluated.
    TagLiteral { raw: String },
    /// A bare expression standing alone (a no-op identifier reference).
    ExprStmt(Expr),
}

/// Expression forms.
///
/// The expression grammar is intentionally minimal: a single token,
/// classified by kind. There are no binary-expression nodes; arithmetic
/// and comparison tokens are never combined at this layer.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Str(String),
    Num(f64),
    Ident(String),
    Bool(bool),
    Null,
}
