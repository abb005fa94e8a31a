//! Tree-walking evaluator for Nexus programs.
//!
//! Execution walks the statement tree directly, side-effecting the global
//! [`StateStore`] and collecting markup components for the materializer.
//! Variable declarations and assignments mirror into the store; assignments
//! additionally notify watchers synchronously. Functions are closures over
//! their defining scope; context blocks run in an isolated scope that is
//! retained by name afterwards.

mod builtins;
mod environment;
mod interpreter;
mod print_handler;
mod shared;
mod state;
mod value;

pub use environment::Scope;
pub use interpreter::{ImportHost, Interpreter};
pub use print_handler::PrintHandler;
pub use shared::Shared;
pub use state::{StateStore, WatcherId};
pub use value::{FuncValue, Value};
