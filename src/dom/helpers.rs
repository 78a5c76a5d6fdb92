//! Tree helpers: search, attribute propagation and text substitution.

use crate::dom::Node;
use crate::error::DomError;
use std::collections::{HashMap, VecDeque};

/// Attributes [`get`] matches a node id against
const ID_ATTRIBUTES: [&str; 3] = ["id", "class", "model"];

/// Substitute `%(name)s` placeholders in every text node below `node`.
///
/// `%%` becomes a literal `%`; any other `%` is kept as is.
pub fn substitute(node: &Node, subs: &HashMap<String, String>) -> Result<(), DomError> {
    for child in node.children() {
        if let Some(value) = child.node_value() {
            if !value.is_empty() {
                child.set_node_value(substitute_text(&value, subs)?);
            }
        }
        substitute(&child, subs)?;
    }
    Ok(())
}

fn substitute_text(text: &str, subs: &HashMap<String, String>) -> Result<String, DomError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 1..];
        if let Some(after) = tail.strip_prefix('%') {
            out.push('%');
            rest = after;
            continue;
        }
        if let Some(named) = tail.strip_prefix('(') {
            if let Some(close) = named.find(')') {
                if let Some(after) = named[close + 1..].strip_prefix('s') {
                    let name = &named[..close];
                    let value = subs
                        .get(name)
                        .ok_or_else(|| DomError::MissingSubstitution(name.to_string()))?;
                    out.push_str(value);
                    rest = after;
                    continue;
                }
            }
        }
        out.push('%');
        rest = tail;
    }
    out.push_str(rest);
    Ok(out)
}

fn find_by_id(node: &Node, node_id: &str) -> Option<Node> {
    if node.has_attributes()
        && ID_ATTRIBUTES
            .iter()
            .any(|attr| node.get_attribute(attr).as_deref() == Some(node_id))
    {
        return Some(node.clone());
    }
    node.children()
        .iter()
        .find_map(|child| find_by_id(child, node_id))
}

/// First node, `node` included, whose `id`, `class` or `model`
/// attribute equals `node_id`, in document order.
pub fn get(node: &Node, node_id: &str) -> Result<Node, DomError> {
    find_by_id(node, node_id).ok_or_else(|| DomError::NodeLookup(node_id.to_string()))
}

/// Like [`get`], `None` when there is no such node.
pub fn get_if_exists(node: &Node, node_id: &str) -> Option<Node> {
    find_by_id(node, node_id)
}

/// [`get`] the node and remove all of its children.
pub fn get_and_clear(node: &Node, node_id: &str) -> Result<Node, DomError> {
    let found = get(node, node_id)?;
    clear_node(&found);
    Ok(found)
}

/// Remove all children of `node`.
pub fn clear_node(node: &Node) {
    while node.remove_last_child().is_some() {}
}

/// Descendants of `node` whose attribute `key` equals `value`, in
/// document order.
pub fn locate_nodes(node: &Node, key: &str, value: &str) -> Vec<Node> {
    let mut found = Vec::new();
    for child in node.children() {
        if !child.is_element() {
            continue;
        }
        if child.get_attribute(key).as_deref() == Some(value) {
            found.push(child.clone());
        }
        found.extend(locate_nodes(&child, key, value));
    }
    found
}

/// Set `key` to `value` on `node` and every element below it.
pub fn super_set_attribute(node: &Node, key: &str, value: &str) {
    propagate_attribute(node, key, &|_| value.to_string());
}

/// Prefix `key` with `value.` on `node` and every element below it.
pub fn super_prepend_attribute(node: &Node, key: &str, value: &str) {
    propagate_attribute(node, key, &|old| match old {
        Some(old) if !old.is_empty() => format!("{}.{}", value, old),
        _ => value.to_string(),
    });
}

/// Suffix `key` with `/value` on `node` and every element below it.
pub fn super_append_attribute(node: &Node, key: &str, value: &str) {
    propagate_attribute(node, key, &|old| match old {
        Some(old) if !old.is_empty() => format!("{}/{}", old, value),
        _ => value.to_string(),
    });
}

fn propagate_attribute(node: &Node, key: &str, update: &dyn Fn(Option<String>) -> String) {
    if !node.is_element() {
        return;
    }
    node.set_attribute(key, &update(node.get_attribute(key)));
    for child in node.children() {
        propagate_attribute(&child, key, update);
    }
}

/// Descendants of `node` named `name`, breadth first.
pub fn get_elements_by_tag_name(node: &Node, name: &str) -> Vec<Node> {
    let mut pending: VecDeque<Node> = node.children().into();
    let mut gathered = Vec::new();
    while let Some(next) = pending.pop_front() {
        pending.extend(next.children());
        if next.node_name() == name {
            gathered.push(next);
        }
    }
    gathered
}

/// Concatenated text of every text node below `node`, breadth first.
pub fn gather_text_nodes(node: &Node) -> String {
    let mut pending: VecDeque<Node> = node.children().into();
    let mut gathered = String::new();
    while let Some(next) = pending.pop_front() {
        pending.extend(next.children());
        if let Some(value) = next.node_value() {
            gathered.push_str(&value);
        }
    }
    gathered
}
