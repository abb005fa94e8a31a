//! Tree-walking interpreter.
//!
//! Walks the statement tree against a scope chain and the global state
//! store. Execution is side-effect oriented: top-level execution returns
//! nothing, mutating the store, the function/context registries, and the
//! collected component list instead. Statement values exist only to feed
//! nested call evaluation.
//!
//! Resolution failures (unknown callee, unknown identifier, unbound
//! handler) are silent no-ops by contract; they are logged via `tracing`
//! but never surfaced as errors.

use crate::builtins;
use crate::environment::Scope;
use crate::print_handler::PrintHandler;
use crate::shared::Shared;
use crate::state::StateStore;
use crate::value::{FuncValue, Value};
use nxs_ir::{Expr, Program, Stmt};
use rustc_hash::FxHashMap;
use std::rc::Rc;
use tracing::debug;

/// Host hook for the `load`/`import`/`require` builtins.
///
/// The loader crate implements this by spinning up a brand-new runtime
/// instance for the nested program; the evaluator only sees a boolean.
pub trait ImportHost {
    /// Load and execute the program at `path`. Returns `true` on success.
    fn load(&self, path: &str) -> bool;
}

/// The evaluator. One instance per runtime; owns the state store and the
/// registries the materializer reads.
pub struct Interpreter {
    globals: Shared<Scope>,
    state: StateStore,
    functions: FxHashMap<String, Rc<FuncValue>>,
    contexts: FxHashMap<String, Shared<Scope>>,
    components: Vec<String>,
    pub(crate) print: PrintHandler,
    pub(crate) import_host: Option<Rc<dyn ImportHost>>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_print_handler(PrintHandler::default())
    }

    pub fn with_print_handler(print: PrintHandler) -> Self {
        Interpreter {
            globals: Shared::new(Scope::new()),
            state: StateStore::new(),
            functions: FxHashMap::default(),
            contexts: FxHashMap::default(),
            components: Vec::new(),
            print,
            import_host: None,
        }
    }

    /// Install the host hook used by the import builtins.
    pub fn set_import_host(&mut self, host: Rc<dyn ImportHost>) {
        self.import_host = Some(host);
    }

    /// Execute a program top to bottom against the global scope.
    ///
    /// The component list is rebuilt from scratch on every execution; a
    /// re-execute fully replaces the previous collection.
    pub fn exec(&mut self, program: &Program) {
        self.components.clear();
        let globals = self.globals.clone();
        for stmt in &program.body {
            self.exec_stmt(stmt, &globals);
        }
    }

    /// Tag literals collected by the last execution, in source order.
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// The global state store.
    pub fn state(&self) -> &StateStore {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut StateStore {
        &mut self.state
    }

    /// Captured print output (empty unless a buffer handler is installed).
    pub fn print_output(&self) -> String {
        self.print.output()
    }

    /// Names of all registered user functions, for the debug surface.
    pub fn function_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.functions.keys().cloned().collect();
        names.sort();
        names
    }

    /// The retained scope of a named context block, if one was executed.
    pub fn context_scope(&self, name: &str) -> Option<&Shared<Scope>> {
        self.contexts.get(name)
    }

    /// Invoke a function by name with no scope context: builtins first,
    /// then the global function table. Unknown names are a silent no-op.
    ///
    /// This is the entry point event dispatch uses for markup-bound
    /// handler attributes.
    pub fn call_by_name(&mut self, name: &str, args: &[Value]) -> Value {
        if let Some(v) = builtins::dispatch(self, name, args) {
            return v;
        }
        if let Some(func) = self.functions.get(name).cloned() {
            return self.invoke(&func, args);
        }
        debug!(%name, "call to unknown function is a no-op");
        Value::Null
    }

    fn exec_stmts(&mut self, stmts: &[Stmt], scope: &Shared<Scope>) -> Value {
        let mut last = Value::Null;
        for stmt in stmts {
            last = self.exec_stmt(stmt, scope);
        }
        last
    }

    fn exec_stmt(&mut self, stmt: &Stmt, scope: &Shared<Scope>) -> Value {
        match stmt {
            Stmt::VarDecl { name, value } => {
                let v = self.eval_expr(value, scope);
                scope.borrow_mut().define(name, v.clone());
                self.state.set(name, v.clone());
                v
            }
            Stmt::Assign { name, value } => {
                let v = self.eval_expr(value, scope);
                scope.borrow_mut().define(name, v.clone());
                self.state.assign(name, v.clone());
                v
            }
            Stmt::Call { callee, args } => {
                let argv: Vec<Value> = args.iter().map(|a| self.eval_expr(a, scope)).collect();
                self.call_in_scope(callee, &argv, scope)
            }
            Stmt::If {
                cond,
                then_body,
                else_body,
            } => {
                if self.eval_expr(cond, scope).is_truthy() {
                    self.exec_stmts(then_body, scope);
                } else if !else_body.is_empty() {
                    self.exec_stmts(else_body, scope);
                }
                Value::Null
            }
            Stmt::FuncDecl { name, params, body } => {
                let func = Rc::new(FuncValue {
                    params: params.clone(),
                    body: body.clone().into(),
                    captured: scope.clone(),
                });
                // Registered in the defining scope and in the global table
                // so markup-bound event attributes can reach it.
                scope.borrow_mut().define(name, Value::Func(func.clone()));
                self.functions.insert(name.clone(), func);
                Value::Null
            }
            Stmt::Context { name, body } => {
                // Fresh scope, isolated from the enclosing chain; the state
                // store remains shared through identifier fallback.
                let ctx_scope = Shared::new(Scope::new());
                self.exec_stmts(body, &ctx_scope);
                self.contexts.insert(name.clone(), ctx_scope);
                Value::Null
            }
            Stmt::TagLiteral { raw } => {
                self.components.push(raw.clone());
                Value::Null
            }
            Stmt::ExprStmt(expr) => self.eval_expr(expr, scope),
        }
    }

    /// Resolve a call inside a scope: builtin table first, then the scope
    /// chain. Unresolved calls are a silent no-op.
    fn call_in_scope(&mut self, name: &str, args: &[Value], scope: &Shared<Scope>) -> Value {
        if let Some(v) = builtins::dispatch(self, name, args) {
            return v;
        }
        let resolved = scope.borrow().lookup(name);
        match resolved {
            Some(Value::Func(func)) => self.invoke(&func, args),
            Some(other) => {
                debug!(%name, kind = other.type_name(), "callee is not a function; no-op");
                Value::Null
            }
            None => {
                debug!(%name, "call to unresolved name is a no-op");
                Value::Null
            }
        }
    }

    /// Invoke a user function: a fresh scope chained to the captured one,
    /// parameters bound positionally. Missing arguments bind null; extra
    /// arguments are ignored (no arity errors).
    fn invoke(&mut self, func: &FuncValue, args: &[Value]) -> Value {
        let scope = Shared::new(Scope::with_parent(func.captured.clone()));
        {
            let mut s = scope.borrow_mut();
            for (i, param) in func.params.iter().enumerate() {
                s.define(param, args.get(i).cloned().unwrap_or(Value::Null));
            }
        }
        self.exec_stmts(&func.body, &scope)
    }

    /// Evaluate an expression: literals are themselves; identifiers look
    /// through the scope chain, then fall back to the global state store,
    /// then to null.
    fn eval_expr(&self, expr: &Expr, scope: &Shared<Scope>) -> Value {
        match expr {
            Expr::Str(s) => Value::Str(s.clone()),
            Expr::Num(n) => Value::Num(*n),
            Expr::Bool(b) => Value::Bool(*b),
            Expr::Null => Value::Null,
            Expr::Ident(name) => {
                if let Some(v) = scope.borrow().lookup(name) {
                    v
                } else {
                    self.state.get(name)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nxs_lexer::tokenize;
    use nxs_parse::parse;
    use pretty_assertions::assert_eq;

    fn run(src: &str) -> Interpreter {
        let mut interp = Interpreter::with_print_handler(PrintHandler::buffer());
        interp.exec(&parse(&tokenize(src)));
        interp
    }

    #[test]
    fn var_decl_mirrors_into_scope_and_store() {
        let interp = run("var count = 41");
        assert_eq!(interp.state().get("count"), Value::Num(41.0));
        assert_eq!(
            interp.globals.borrow().lookup("count"),
            Some(Value::Num(41.0))
        );
    }

    #[test]
    fn string_and_bool_and_null_literals_evaluate() {
        let interp = run("var a = \"hi\"\nvar b = true\nvar c = null");
        assert_eq!(interp.state().get("a"), Value::Str("hi".into()));
        assert_eq!(interp.state().get("b"), Value::Bool(true));
        assert_eq!(interp.state().get("c"), Value::Null);
    }

    #[test]
    fn assign_fires_watchers_in_registration_order() {
        let mut interp = Interpreter::new();
        let order = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        for tag in ["a", "b"] {
            let o = order.clone();
            interp
                .state_mut()
                .watch("x", move |v| o.borrow_mut().push((tag, v.clone())));
        }
        interp.exec(&parse(&tokenize("x = 9")));
        assert_eq!(
            *order.borrow(),
            vec![("a", Value::Num(9.0)), ("b", Value::Num(9.0))]
        );
    }

    #[test]
    fn var_decl_does_not_fire_watchers() {
        let mut interp = Interpreter::new();
        let fired = std::rc::Rc::new(std::cell::RefCell::new(0));
        let f = fired.clone();
        interp.state_mut().watch("x", move |_| *f.borrow_mut() += 1);
        interp.exec(&parse(&tokenize("var x = 1")));
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn println_call_reaches_the_print_handler() {
        let interp = run("println(\"hi\")");
        assert_eq!(interp.print_output(), "hi\n");
        // Diagnostic output only; no state mutation.
        assert!(interp.state().snapshot().is_empty());
    }

    #[test]
    fn unresolved_call_is_a_silent_no_op() {
        let interp = run("missing(1, 2)\nvar after = 1");
        assert_eq!(interp.state().get("after"), Value::Num(1.0));
    }

    #[test]
    fn calling_a_non_function_value_is_a_no_op() {
        let interp = run("var x = 3\nx(1)\nvar after = 1");
        assert_eq!(interp.state().get("after"), Value::Num(1.0));
    }

    #[test]
    fn func_decl_registers_and_is_callable() {
        let interp = run("func greet() { message = \"hello\" }\ngreet()");
        assert_eq!(interp.state().get("message"), Value::Str("hello".into()));
        assert_eq!(interp.function_names(), vec!["greet".to_string()]);
    }

    #[test]
    fn missing_arguments_bind_null() {
        let interp = run("func f(a, b) { first = a\nsecond = b }\nf(1)");
        assert_eq!(interp.state().get("first"), Value::Num(1.0));
        assert_eq!(interp.state().get("second"), Value::Null);
    }

    #[test]
    fn extra_arguments_are_ignored() {
        let interp = run("func f(a) { got = a }\nf(1, 2, 3)");
        assert_eq!(interp.state().get("got"), Value::Num(1.0));
    }

    #[test]
    fn call_by_name_reaches_registered_functions() {
        let mut interp = run("func go() { clicked = true }");
        interp.call_by_name("go", &[]);
        assert_eq!(interp.state().get("clicked"), Value::Bool(true));
    }

    #[test]
    fn call_by_name_of_unknown_function_does_not_panic() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.call_by_name("ghost", &[]), Value::Null);
    }

    #[test]
    fn if_takes_then_branch_on_truthy() {
        let interp = run("var go = true\nif go { taken = 1 } else { taken = 2 }");
        assert_eq!(interp.state().get("taken"), Value::Num(1.0));
    }

    #[test]
    fn if_takes_else_branch_on_falsy() {
        for falsy in ["false", "0", "\"\"", "null"] {
            let interp = run(&format!("var go = {falsy}\nif go {{ t = 1 }} else {{ t = 2 }}"));
            assert_eq!(interp.state().get("t"), Value::Num(2.0), "for {falsy}");
        }
    }

    #[test]
    fn if_without_else_is_a_no_op_on_falsy() {
        let interp = run("if nope { t = 1 }\nvar after = 1");
        assert_eq!(interp.state().get("t"), Value::Null);
        assert_eq!(interp.state().get("after"), Value::Num(1.0));
    }

    #[test]
    fn context_scope_is_isolated_but_store_is_shared() {
        let interp = run("var outer = 1\ncontext ui { var theme = \"dark\"\nseen = outer }");
        // The declaration inside the context still mirrors to the store.
        assert_eq!(interp.state().get("theme"), Value::Str("dark".into()));
        // `outer` is not in the context's chain, but reaches it via the store.
        assert_eq!(interp.state().get("seen"), Value::Num(1.0));
        // The context scope itself does not contain `outer`.
        let ctx = interp.context_scope("ui").expect("context retained");
        assert_eq!(ctx.borrow().lookup("outer"), None);
        assert_eq!(ctx.borrow().lookup("theme"), Some(Value::Str("dark".into())));
    }

    #[test]
    fn tag_literals_collect_in_source_order() {
        let interp = run("<view>a</view>\nvar x = 1\n<btn>Go</btn>");
        assert_eq!(
            interp.components(),
            ["<view>a</view>".to_string(), "<btn>Go</btn>".to_string()]
        );
    }

    #[test]
    fn re_execution_replaces_the_component_list() {
        let mut interp = Interpreter::new();
        let program = parse(&tokenize("<view>a</view>"));
        interp.exec(&program);
        interp.exec(&program);
        assert_eq!(interp.components().len(), 1);
    }

    #[test]
    fn free_identifier_falls_back_to_the_store_then_null() {
        let interp = run("var copy = ghost");
        assert_eq!(interp.state().get("copy"), Value::Null);
    }
}
