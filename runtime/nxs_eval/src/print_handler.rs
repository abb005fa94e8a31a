//! Host output for the diagnostic builtins.
//!
//! `println`/`print`/`log` and `alert` go through a print handler so that
//! output can be directed to stdout (the default) or captured in a buffer
//! for tests and embedded hosts. Enum dispatch, no trait objects.

use crate::shared::Shared;

/// Destination for builtin diagnostic output.
#[derive(Clone, Debug, Default)]
pub enum PrintHandler {
    /// Write to stdout (alerts to stderr).
    #[default]
    Stdout,
    /// Capture into an in-memory buffer.
    Buffer(Shared<String>),
}

impl PrintHandler {
    /// A fresh capturing handler.
    pub fn buffer() -> Self {
        PrintHandler::Buffer(Shared::default())
    }

    /// Print a line.
    pub fn println(&self, msg: &str) {
        match self {
            PrintHandler::Stdout => println!("{msg}"),
            PrintHandler::Buffer(buf) => {
                let mut b = buf.borrow_mut();
                b.push_str(msg);
                b.push('\n');
            }
        }
    }

    /// Print without a newline.
    pub fn print(&self, msg: &str) {
        match self {
            PrintHandler::Stdout => print!("{msg}"),
            PrintHandler::Buffer(buf) => buf.borrow_mut().push_str(msg),
        }
    }

    /// Host notification (the original host's `alert`).
    pub fn alert(&self, msg: &str) {
        match self {
            PrintHandler::Stdout => eprintln!("[alert] {msg}"),
            PrintHandler::Buffer(buf) => {
                let mut b = buf.borrow_mut();
                b.push_str("[alert] ");
                b.push_str(msg);
                b.push('\n');
            }
        }
    }

    /// Captured output. Empty for the stdout handler, which captures
    /// nothing.
    pub fn output(&self) -> String {
        match self {
            PrintHandler::Stdout => String::new(),
            PrintHandler::Buffer(buf) => buf.borrow().clone(),
        }
    }
}
