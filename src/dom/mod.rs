//! Minimal document tree and the helpers templates use on it.

pub mod helpers;
pub mod node;

pub use helpers::{
    clear_node, gather_text_nodes, get, get_and_clear, get_elements_by_tag_name, get_if_exists,
    locate_nodes, substitute, super_append_attribute, super_prepend_attribute,
    super_set_attribute,
};
pub use node::{Node, NodeData};
