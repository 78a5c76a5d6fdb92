//! In-memory document nodes

use crate::capability::Capability;
use crate::context::Tag;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Node payload
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Element with ordered attributes and children
    Element {
        name: String,
        attributes: Vec<(String, String)>,
        children: Vec<Node>,
    },
    /// Text content
    Text { value: String },
}

/// Shared handle to a document node.
///
/// Cloning the handle shares the node; [`Node::clone_node`] copies it.
#[derive(Clone)]
pub struct Node(Rc<RefCell<NodeData>>);

impl Node {
    pub fn element(name: impl Into<String>) -> Node {
        Node::from_data(NodeData::Element {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        })
    }

    pub fn text(value: impl Into<String>) -> Node {
        Node::from_data(NodeData::Text {
            value: value.into(),
        })
    }

    fn from_data(data: NodeData) -> Node {
        Node(Rc::new(RefCell::new(data)))
    }

    /// Builder form of [`Node::set_attribute`].
    pub fn with_attribute(self, key: &str, value: &str) -> Node {
        self.set_attribute(key, value);
        self
    }

    /// Builder form of [`Node::append_child`].
    pub fn with_child(self, child: Node) -> Node {
        self.append_child(child);
        self
    }

    pub fn is_element(&self) -> bool {
        matches!(&*self.0.borrow(), NodeData::Element { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(&*self.0.borrow(), NodeData::Text { .. })
    }

    /// Element name, or `#text` for text nodes.
    pub fn node_name(&self) -> String {
        match &*self.0.borrow() {
            NodeData::Element { name, .. } => name.clone(),
            NodeData::Text { .. } => "#text".to_string(),
        }
    }

    /// Text content of a text node.
    pub fn node_value(&self) -> Option<String> {
        match &*self.0.borrow() {
            NodeData::Text { value } => Some(value.clone()),
            NodeData::Element { .. } => None,
        }
    }

    /// Replace the content of a text node. No effect on elements.
    pub fn set_node_value(&self, new_value: impl Into<String>) {
        if let NodeData::Text { value } = &mut *self.0.borrow_mut() {
            *value = new_value.into();
        }
    }

    pub fn get_attribute(&self, key: &str) -> Option<String> {
        match &*self.0.borrow() {
            NodeData::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone()),
            NodeData::Text { .. } => None,
        }
    }

    /// Set or replace an attribute, keeping its position. No effect on
    /// text nodes.
    pub fn set_attribute(&self, key: &str, value: &str) {
        if let NodeData::Element { attributes, .. } = &mut *self.0.borrow_mut() {
            match attributes.iter_mut().find(|(k, _)| k == key) {
                Some((_, existing)) => *existing = value.to_string(),
                None => attributes.push((key.to_string(), value.to_string())),
            }
        }
    }

    pub fn has_attributes(&self) -> bool {
        match &*self.0.borrow() {
            NodeData::Element { attributes, .. } => !attributes.is_empty(),
            NodeData::Text { .. } => false,
        }
    }

    pub fn attributes(&self) -> Vec<(String, String)> {
        match &*self.0.borrow() {
            NodeData::Element { attributes, .. } => attributes.clone(),
            NodeData::Text { .. } => Vec::new(),
        }
    }

    pub fn children(&self) -> Vec<Node> {
        match &*self.0.borrow() {
            NodeData::Element { children, .. } => children.clone(),
            NodeData::Text { .. } => Vec::new(),
        }
    }

    pub fn has_child_nodes(&self) -> bool {
        match &*self.0.borrow() {
            NodeData::Element { children, .. } => !children.is_empty(),
            NodeData::Text { .. } => false,
        }
    }

    /// Append `child`. Text nodes cannot hold children; the call is ignored.
    pub fn append_child(&self, child: Node) {
        if let NodeData::Element { children, .. } = &mut *self.0.borrow_mut() {
            children.push(child);
        }
    }

    /// Remove and return the last child.
    pub fn remove_last_child(&self) -> Option<Node> {
        match &mut *self.0.borrow_mut() {
            NodeData::Element { children, .. } => children.pop(),
            NodeData::Text { .. } => None,
        }
    }

    /// Copy this node; `deep` copies the whole subtree, otherwise the copy
    /// has no children.
    pub fn clone_node(&self, deep: bool) -> Node {
        let data = match &*self.0.borrow() {
            NodeData::Element {
                name,
                attributes,
                children,
            } => NodeData::Element {
                name: name.clone(),
                attributes: attributes.clone(),
                children: if deep {
                    children.iter().map(|child| child.clone_node(true)).collect()
                } else {
                    Vec::new()
                },
            },
            NodeData::Text { value } => NodeData::Text {
                value: value.clone(),
            },
        };
        Node::from_data(data)
    }

    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0.borrow(), f)
    }
}

impl Tag for Node {
    fn slot_data(&self) -> Option<HashMap<String, Capability>> {
        None
    }

    fn clone_tag(&self, deep: bool) -> Rc<dyn Tag> {
        Rc::new(self.clone_node(deep))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
