//! Attribute rewriting and tag substitution.
//!
//! Render step one is textual: directive attributes (`@bind`, `@click`,
//! `@change`, `@input`) become neutral `data-*` attributes before the
//! markup is structurally parsed. Step two remaps custom root tags to
//! host-native elements with a class marker.

use crate::tree::{NodeId, Tree};

/// Directive attribute names, matched after `@` and before `=`.
const DIRECTIVES: &[&str] = &["bind", "click", "change", "input"];

/// Rewrite `@bind="X"` (and the other directives, single- or double-quoted)
/// to `data-bind="X"`, preserving the attribute value verbatim. A lone `@`
/// matching no directive passes through unchanged.
pub fn rewrite_directives(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len() + 16);
    let mut rest = markup;
    'scan: while let Some(at) = rest.find('@') {
        out.push_str(&rest[..at]);
        let tail = &rest[at + 1..];
        for name in DIRECTIVES {
            if let Some(after) = tail.strip_prefix(name) {
                let bytes = after.as_bytes();
                if bytes.first() == Some(&b'=')
                    && matches!(bytes.get(1), Some(b'"') | Some(b'\''))
                {
                    out.push_str("data-");
                    out.push_str(name);
                    rest = after;
                    continue 'scan;
                }
            }
        }
        out.push('@');
        rest = tail;
    }
    out.push_str(rest);
    out
}

/// Custom tag → (host tag, class marker). These are replaced wholesale:
/// only `data-*` attributes survive the remap.
fn substitution(tag: &str) -> Option<(&'static str, &'static str)> {
    match tag {
        "view" => Some(("div", "nxs-view")),
        "card" => Some(("div", "nxs-card")),
        "text" => Some(("span", "nxs-text")),
        "heading" => Some(("h1", "nxs-heading")),
        "subheading" => Some(("h2", "nxs-subheading")),
        _ => None,
    }
}

/// Remap a component's root element to its host-native form.
///
/// Table tags are renamed with only their `data-*` attributes kept and the
/// class marker applied. `btn`/`button` become `button` and `input` stays
/// `input`; both keep all attributes and gain their marker class when
/// absent. Anything else passes through untouched.
pub(crate) fn substitute_root(tree: &mut Tree, node: NodeId) {
    let Some(tag) = tree.tag(node).map(str::to_string) else {
        return;
    };
    if let Some((host_tag, class)) = substitution(&tag) {
        tree.set_tag(node, host_tag);
        tree.retain_attrs(node, |name| name.starts_with("data-"));
        tree.set_attr(node, "class", class);
        return;
    }
    match tag.as_str() {
        "btn" | "button" => {
            tree.set_tag(node, "button");
            tree.ensure_class(node, "nxs-btn");
        }
        "input" => tree.ensure_class(node, "nxs-input"),
        _ => {}
    }
}
