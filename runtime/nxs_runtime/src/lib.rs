//! The Nexus runtime: load, execute, render.
//!
//! A [`Runtime`] instance owns one evaluator, one state store, and one
//! presentation tree. [`Runtime::load`] fetches a `.nxs` source and runs
//! the tokenizer and parser; [`Runtime::execute`] evaluates the retained
//! program and materializes its components. Both steps can be repeated;
//! execution fully replaces the previous render.
//!
//! The `load`/`import`/`require` builtins spin up a brand-new `Runtime`
//! for the imported program, sharing only the fetcher and print handler.
//! State stores and registries are per-instance and there is no dedup:
//! importing the same path twice fetches and executes it twice. Nested
//! depth is capped (see [`MAX_IMPORT_DEPTH`]) so a program importing
//! itself terminates instead of exhausting the stack.

mod fetch;

pub use fetch::{FetchError, Fetcher, FsFetcher, MapFetcher};

use nxs_dom::{EventKind, NodeId, Renderer, Tree};
use nxs_eval::{ImportHost, Interpreter, PrintHandler, Shared, Value};
use nxs_ir::Program;
use rustc_hash::FxHashMap;
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, warn};

/// Nested imports beyond this depth are refused (the import builtin
/// returns `false`). Bounds self-importing programs, which would
/// otherwise recurse until stack exhaustion.
pub const MAX_IMPORT_DEPTH: usize = 32;

/// Why a load failed. Tokenizing and parsing are total, so fetching is
/// the only failing stage.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// One Nexus runtime instance.
pub struct Runtime {
    fetcher: Rc<dyn Fetcher>,
    interp: Interpreter,
    renderer: Renderer,
    program: Option<Program>,
}

impl Runtime {
    pub fn new(fetcher: Rc<dyn Fetcher>) -> Self {
        Runtime::with_print_handler(fetcher, PrintHandler::default())
    }

    /// A runtime whose diagnostic builtins write to `print`. Nested
    /// imports inherit the same handler, so their output interleaves
    /// with the parent's.
    pub fn with_print_handler(fetcher: Rc<dyn Fetcher>, print: PrintHandler) -> Self {
        Runtime::at_depth(fetcher, print, 0)
    }

    fn at_depth(fetcher: Rc<dyn Fetcher>, print: PrintHandler, depth: usize) -> Self {
        let mut interp = Interpreter::with_print_handler(print.clone());
        interp.set_import_host(Rc::new(NestedLoader {
            fetcher: fetcher.clone(),
            print,
            depth,
        }));
        Runtime {
            fetcher,
            interp,
            renderer: Renderer::new(),
            program: None,
        }
    }

    /// Fetch, tokenize, and parse the program at `path`, retaining the
    /// statement tree for [`execute`](Runtime::execute).
    pub fn load(&mut self, path: &str) -> Result<&Program, LoadError> {
        let source = self.fetcher.fetch(path)?;
        debug!(%path, bytes = source.len(), "loaded source");
        let tokens = nxs_lexer::tokenize(&source);
        let program = nxs_parse::parse(&tokens);
        Ok(&*self.program.insert(program))
    }

    /// Evaluate the loaded program and render its components into the
    /// presentation tree. A no-op (with a warning) before any `load`.
    pub fn execute(&mut self) {
        let Some(program) = self.program.take() else {
            warn!("execute called before load; nothing to run");
            return;
        };
        self.interp.exec(&program);
        self.program = Some(program);
        let components = self.interp.components().to_vec();
        self.renderer.render(&components, self.interp.state_mut());
    }

    /// Shared handle to the presentation tree.
    pub fn tree(&self) -> &Shared<Tree> {
        self.renderer.tree()
    }

    /// Serialized markup of the current presentation tree.
    pub fn markup(&self) -> String {
        self.renderer.markup()
    }

    /// Deliver a host interaction event to a rendered node.
    pub fn dispatch(&mut self, node: NodeId, event: EventKind) {
        self.renderer.dispatch(node, event, &mut self.interp);
    }

    /// Deliver host text input to a bound node.
    pub fn input(&mut self, node: NodeId, text: &str) {
        self.renderer.input(node, text, self.interp.state_mut());
    }

    /// Current value of a state key (null when absent).
    pub fn state_value(&self, key: &str) -> Value {
        self.interp.state().get(key)
    }

    /// Debug surface: snapshot of the whole state store.
    pub fn state_snapshot(&self) -> FxHashMap<String, Value> {
        self.interp.state().snapshot()
    }

    /// Debug surface: names of registered functions, sorted.
    pub fn function_names(&self) -> Vec<String> {
        self.interp.function_names()
    }

    /// Debug surface: number of components collected by the last execute.
    pub fn component_count(&self) -> usize {
        self.interp.components().len()
    }

    /// Output captured by a buffering print handler.
    pub fn print_output(&self) -> String {
        self.interp.print_output()
    }
}

/// Import host wired into each interpreter: builds a fresh runtime per
/// imported program.
struct NestedLoader {
    fetcher: Rc<dyn Fetcher>,
    print: PrintHandler,
    depth: usize,
}

impl ImportHost for NestedLoader {
    fn load(&self, path: &str) -> bool {
        if self.depth >= MAX_IMPORT_DEPTH {
            warn!(%path, depth = self.depth, "import depth limit reached; refusing");
            return false;
        }
        let mut nested =
            Runtime::at_depth(self.fetcher.clone(), self.print.clone(), self.depth + 1);
        match nested.load(path) {
            Ok(_) => {
                nested.execute();
                true
            }
            Err(err) => {
                warn!(%path, %err, "nested import failed");
                false
            }
        }
    }
}
