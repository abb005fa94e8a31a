//! Arena presentation tree.
//!
//! Stands in for the host document: elements with ordered attributes and
//! children, plus text nodes, indexed by [`NodeId`]. Nodes are never freed;
//! a teardown only detaches them from the tree, so stale ids stay valid
//! (they just point at unparented nodes). All ids handed out by a `Tree`
//! are valid for its lifetime.

/// Index of a node in its [`Tree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
enum NodeKind {
    Element {
        tag: String,
        // Ordered so serialization is deterministic.
        attrs: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    children: Vec<NodeId>,
}

/// The presentation tree. Created with a single root container element
/// that render output mounts under.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        let mut tree = Tree {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        tree.root = tree.create_element("nxs-root");
        tree
    }

    /// The mount-point element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_string(),
            attrs: Vec::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            children: Vec::new(),
        });
        id
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
    }

    /// Detach all children. The detached nodes remain allocated.
    pub fn clear_children(&mut self, node: NodeId) {
        self.nodes[node.0].children.clear();
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Element tag name; `None` for text nodes.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    /// Rename an element. No-op on text nodes.
    pub fn set_tag(&mut self, node: NodeId, new_tag: &str) {
        if let NodeKind::Element { tag, .. } = &mut self.nodes[node.0].kind {
            *tag = new_tag.to_string();
        }
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    /// Set or replace an attribute. No-op on text nodes.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeKind::Element { attrs, .. } = &mut self.nodes[node.0].kind {
            if let Some(slot) = attrs.iter_mut().find(|(n, _)| n == name) {
                slot.1 = value.to_string();
            } else {
                attrs.push((name.to_string(), value.to_string()));
            }
        }
    }

    /// Drop every attribute for which `keep` returns `false`.
    pub fn retain_attrs(&mut self, node: NodeId, keep: impl Fn(&str) -> bool) {
        if let NodeKind::Element { attrs, .. } = &mut self.nodes[node.0].kind {
            attrs.retain(|(n, _)| keep(n));
        }
    }

    /// Append a space-separated class token unless already present.
    pub fn ensure_class(&mut self, node: NodeId, class: &str) {
        match self.attr(node, "class") {
            Some(existing) if existing.split_whitespace().any(|c| c == class) => {}
            Some(existing) => {
                let merged = format!("{existing} {class}");
                self.set_attr(node, "class", &merged);
            }
            None => self.set_attr(node, "class", class),
        }
    }

    /// Concatenated text of the node and its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { .. } => {
                for &child in &self.nodes[node.0].children {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Replace the node's children with a single text node.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        let t = self.create_text(text);
        self.nodes[node.0].children.clear();
        self.nodes[node.0].children.push(t);
    }

    /// Pre-order walk of `node` and its descendants.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            out.push(id);
            for &child in self.nodes[id.0].children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Serialize the subtree rooted at `node` back to markup text.
    ///
    /// The tree grows monotonically across renders, so structural
    /// comparisons go through this serialization rather than node ids.
    pub fn markup(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_markup(node, &mut out);
        out
    }

    fn write_markup(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { tag, attrs } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(value);
                    out.push('"');
                }
                out.push('>');
                for &child in &self.nodes[node.0].children {
                    self.write_markup(child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}
