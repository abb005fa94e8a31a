//! Recursive descent parser for the Nexus runtime.
//!
//! Consumes the token sequence and produces a [`Program`] — an ordered list
//! of statements — using first-token dispatch and index-based peek/consume.
//!
//! Parsing is partial-tolerant: a failure while parsing one statement is
//! caught, logged, and recovered from by advancing a single token, so one
//! malformed statement never aborts the whole parse. The malformed
//! statement is simply absent from the tree.
//!
//! The expression grammar is a single classified token (string, number,
//! identifier, `true`/`false`/`null`). There is no operator-precedence
//! layer: in `x = x + 1` the right-hand side is the identifier `x`, and
//! the trailing `+ 1` is consumed by the statement loop as malformed
//! statements and dropped. This degradation is deliberate and covered by
//! tests; extending it would be a behavior change, not a fix.

mod cursor;
mod error;
mod number;

pub use cursor::Cursor;
pub use error::ParseError;

use nxs_ir::{Expr, Program, Stmt, Token, TokenKind};
use tracing::debug;

/// Parse a token sequence into a [`Program`].
///
/// Never fails: statements that do not parse are skipped (see module docs).
pub fn parse(tokens: &[Token]) -> Program {
    let mut cursor = Cursor::new(tokens);
    let body = parse_stmts_until(&mut cursor, None);
    Program::new(body)
}

/// Parse statements until `closer` (or end of input when `None`).
///
/// Block bodies are delimited by balanced braces consumed by this loop; a
/// dangling unmatched brace lets the loop run to end of input.
fn parse_stmts_until(cursor: &mut Cursor, closer: Option<&str>) -> Vec<Stmt> {
    let mut stmts = Vec::new();
    while !cursor.is_at_end() {
        if let Some(op) = closer {
            if cursor.check_op(op) {
                break;
            }
        }
        let before = cursor.position();
        match parse_stmt(cursor) {
            Ok(stmt) => stmts.push(stmt),
            Err(err) => {
                debug!(%err, "skipping malformed statement");
                // Guarantee progress: consume at least one token.
                if cursor.position() == before {
                    cursor.advance();
                }
            }
        }
    }
    stmts
}

/// Parse one statement, dispatching on its first token.
fn parse_stmt(cursor: &mut Cursor) -> Result<Stmt, ParseError> {
    let Some(tok) = cursor.current() else {
        return Err(ParseError::new("unexpected end of input", cursor.position()));
    };

    match tok.kind {
        TokenKind::Keyword => match tok.text.as_str() {
            "var" | "let" | "const" => parse_var_decl(cursor),
            "func" => parse_func_decl(cursor),
            "if" => parse_if(cursor),
            "context" => parse_context(cursor),
            other => Err(ParseError::new(
                format!("keyword `{other}` has no statement form"),
                cursor.position(),
            )),
        },
        TokenKind::Tag => {
            let raw = tok.text.clone();
            cursor.advance();
            Ok(Stmt::TagLiteral { raw })
        }
        TokenKind::Ident => parse_ident_stmt(cursor),
        _ => Err(ParseError::new(
            format!("token {tok:?} cannot start a statement"),
            cursor.position(),
        )),
    }
}

/// `var|let|const NAME [= expr]`. A missing initializer defaults to null.
fn parse_var_decl(cursor: &mut Cursor) -> Result<Stmt, ParseError> {
    cursor.advance(); // var/let/const
    let name = cursor.expect_ident()?;
    let value = if cursor.eat_op("=") {
        parse_expr(cursor)?
    } else {
        Expr::Null
    };
    Ok(Stmt::VarDecl { name, value })
}

/// `func NAME(param, ...) { stmts }`.
fn parse_func_decl(cursor: &mut Cursor) -> Result<Stmt, ParseError> {
    cursor.advance(); // func
    let name = cursor.expect_ident()?;
    cursor.expect_op("(")?;
    let mut params = Vec::new();
    while !cursor.check_op(")") && !cursor.is_at_end() {
        params.push(cursor.expect_ident()?);
        if !cursor.eat_op(",") {
            break;
        }
    }
    cursor.expect_op(")")?;
    let body = parse_block(cursor)?;
    Ok(Stmt::FuncDecl { name, params, body })
}

/// `if expr { stmts } [else { stmts }]`.
fn parse_if(cursor: &mut Cursor) -> Result<Stmt, ParseError> {
    cursor.advance(); // if
    let cond = parse_expr(cursor)?;
    let then_body = parse_block(cursor)?;
    let else_body = if cursor.check_keyword("else") {
        cursor.advance();
        parse_block(cursor)?
    } else {
        Vec::new()
    };
    Ok(Stmt::If {
        cond,
        then_body,
        else_body,
    })
}

/// `context NAME { stmts }`.
fn parse_context(cursor: &mut Cursor) -> Result<Stmt, ParseError> {
    cursor.advance(); // context
    let name = cursor.expect_ident()?;
    let body = parse_block(cursor)?;
    Ok(Stmt::Context { name, body })
}

/// `IDENT = expr` (assign), `IDENT(args)` (call), `IDENT LITERAL`
/// (paren-less single-argument call), or bare `IDENT` (a no-op
/// reference statement).
fn parse_ident_stmt(cursor: &mut Cursor) -> Result<Stmt, ParseError> {
    let name = cursor.expect_ident()?;
    if cursor.eat_op("=") {
        let value = parse_expr(cursor)?;
        return Ok(Stmt::Assign { name, value });
    }
    if cursor.eat_op("(") {
        let mut args = Vec::new();
        while !cursor.check_op(")") && !cursor.is_at_end() {
            args.push(parse_expr(cursor)?);
            if !cursor.eat_op(",") {
                break;
            }
        }
        cursor.expect_op(")")?;
        return Ok(Stmt::Call { callee: name, args });
    }
    // A string or number literal directly after an identifier is a
    // paren-less call (`println "hi"`). Restricted to literals so a bare
    // identifier followed by the next statement never fuses with it.
    if let Some(next) = cursor.current() {
        if matches!(next.kind, TokenKind::Str | TokenKind::Num) {
            let arg = parse_expr(cursor)?;
            return Ok(Stmt::Call {
                callee: name,
                args: vec![arg],
            });
        }
    }
    Ok(Stmt::ExprStmt(Expr::Ident(name)))
}

/// `{ stmts }` with per-statement recovery inside the block.
fn parse_block(cursor: &mut Cursor) -> Result<Vec<Stmt>, ParseError> {
    cursor.expect_op("{")?;
    let stmts = parse_stmts_until(cursor, Some("}"));
    // A dangling open brace runs the loop to end of input; the missing
    // close brace is then simply absent.
    cursor.eat_op("}");
    Ok(stmts)
}

/// The minimal expression grammar: exactly one token, classified.
fn parse_expr(cursor: &mut Cursor) -> Result<Expr, ParseError> {
    let at = cursor.position();
    let Some(tok) = cursor.advance() else {
        return Err(ParseError::new("expected expression", at));
    };
    match tok.kind {
        TokenKind::Str => Ok(Expr::Str(tok.text.clone())),
        TokenKind::Num => Ok(Expr::Num(number::float_prefix(&tok.text))),
        TokenKind::Ident => Ok(Expr::Ident(tok.text.clone())),
        TokenKind::Keyword => match tok.text.as_str() {
            "true" => Ok(Expr::Bool(true)),
            "false" => Ok(Expr::Bool(false)),
            "null" => Ok(Expr::Null),
            other => Err(ParseError::new(
                format!("keyword `{other}` is not an expression"),
                at,
            )),
        },
        _ => Err(ParseError::new(format!("token {tok:?} is not an expression"), at)),
    }
}
