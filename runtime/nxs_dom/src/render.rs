//! Render pipeline and event surface.
//!
//! A render is a full teardown and rebuild: the mount point is cleared,
//! every component's raw markup is directive-rewritten, structurally
//! parsed, root-substituted, and then the binding pass wires `data-bind`
//! nodes to the state store and records `data-click`/`data-change`/
//! `data-input` handler names for dispatch.
//!
//! Bound nodes refresh through store watchers that hold a shared handle to
//! the tree. Watchers registered by the previous render are removed first,
//! so stale node ids never receive updates.

use crate::parse::parse_fragment;
use crate::rewrite::{rewrite_directives, substitute_root};
use crate::tree::{NodeId, Tree};
use nxs_eval::{Interpreter, Shared, StateStore, Value, WatcherId};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Host interaction events the materializer understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Change,
    Input,
}

impl EventKind {
    fn attr(self) -> &'static str {
        match self {
            EventKind::Click => "data-click",
            EventKind::Change => "data-change",
            EventKind::Input => "data-input",
        }
    }
}

const EVENTS: &[EventKind] = &[EventKind::Click, EventKind::Change, EventKind::Input];

/// Tags whose binding surface is the `value` attribute rather than text
/// content.
fn is_input_like(tag: &str) -> bool {
    matches!(tag, "input" | "textarea" | "select")
}

/// Owns the presentation tree and the per-render binding state.
pub struct Renderer {
    tree: Shared<Tree>,
    bindings: FxHashMap<NodeId, String>,
    handlers: FxHashMap<(NodeId, EventKind), String>,
    watcher_ids: Vec<WatcherId>,
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            tree: Shared::new(Tree::new()),
            bindings: FxHashMap::default(),
            handlers: FxHashMap::default(),
            watcher_ids: Vec::new(),
        }
    }

    /// Shared handle to the presentation tree.
    pub fn tree(&self) -> &Shared<Tree> {
        &self.tree
    }

    /// Serialized markup of the current tree, rooted at the mount point.
    pub fn markup(&self) -> String {
        let tree = self.tree.borrow();
        tree.markup(tree.root())
    }

    /// Tear down and rebuild the tree from `components`, then run the
    /// binding pass against `state`.
    pub fn render(&mut self, components: &[String], state: &mut StateStore) {
        for id in self.watcher_ids.drain(..) {
            state.unwatch(id);
        }
        self.bindings.clear();
        self.handlers.clear();

        let mut mounted = Vec::new();
        {
            let mut tree = self.tree.borrow_mut();
            let root = tree.root();
            tree.clear_children(root);
            for raw in components {
                let rewritten = rewrite_directives(raw);
                let roots = parse_fragment(&mut tree, root, &rewritten);
                for node in roots {
                    substitute_root(&mut tree, node);
                    mounted.push(node);
                }
            }
        }

        for node in mounted {
            let subtree = self.tree.borrow().descendants(node);
            for id in subtree {
                self.bind_node(id, state);
            }
        }
    }

    fn bind_node(&mut self, node: NodeId, state: &mut StateStore) {
        let Some(tag) = self.tree.borrow().tag(node).map(str::to_string) else {
            return;
        };

        let bind_key = self.tree.borrow().attr(node, "data-bind").map(str::to_string);
        if let Some(key) = bind_key {
            let input_like = is_input_like(&tag);
            apply_bound_value(&mut self.tree.borrow_mut(), node, input_like, &state.get(&key));
            let tree = self.tree.clone();
            let id = state.watch(&key, move |value| {
                apply_bound_value(&mut tree.borrow_mut(), node, input_like, value);
            });
            self.watcher_ids.push(id);
            self.bindings.insert(node, key);
        }

        for &event in EVENTS {
            let handler = self
                .tree
                .borrow()
                .attr(node, event.attr())
                .map(strip_call_suffix);
            if let Some(name) = handler {
                self.handlers.insert((node, event), name);
            }
        }
    }

    /// Deliver a host interaction event to `node`. The handler name is
    /// resolved at dispatch time; an unregistered function is a silent
    /// no-op, as is an event no node is listening for.
    pub fn dispatch(&self, node: NodeId, event: EventKind, interp: &mut Interpreter) {
        match self.handlers.get(&(node, event)) {
            Some(name) => {
                interp.call_by_name(name, &[]);
            }
            None => debug!(?event, "event on a node with no handler; ignored"),
        }
    }

    /// Deliver host text input to a bound node: the new text is written
    /// back to the bound state key, notifying its watchers (including the
    /// node's own refresh watcher). Unbound nodes ignore input.
    pub fn input(&self, node: NodeId, text: &str, state: &mut StateStore) {
        match self.bindings.get(&node) {
            Some(key) => state.assign(key, Value::Str(text.to_string())),
            None => debug!("input on an unbound node; ignored"),
        }
    }

}

fn apply_bound_value(tree: &mut Tree, node: NodeId, input_like: bool, value: &Value) {
    let text = value.display_text();
    if input_like {
        tree.set_attr(node, "value", &text);
    } else {
        tree.set_text_content(node, &text);
    }
}

fn strip_call_suffix(attr: &str) -> String {
    let name = attr.trim();
    match name.find('(') {
        Some(pos) => name[..pos].to_string(),
        None => name.to_string(),
    }
}
