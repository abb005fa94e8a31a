//! Reactive materializer for Nexus components.
//!
//! Turns the raw tag literals the evaluator collects into a presentation
//! tree with two-way data binding: directive attributes are rewritten to
//! `data-*`, the markup is structurally parsed, custom root tags are
//! substituted for host-native ones, and bound nodes are wired to the
//! global state store through watchers. Hosts deliver interaction events
//! through the [`Renderer`]'s explicit `dispatch`/`input` surface.

mod parse;
mod render;
mod rewrite;
mod tree;

pub use parse::parse_fragment;
pub use render::{EventKind, Renderer};
pub use rewrite::rewrite_directives;
pub use tree::{NodeId, Tree};
