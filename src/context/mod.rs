//! Rendering contexts: a parent-linked chain threading request-scoped
//! values, capability lookups and slot fills through a render.
//!
//! A render builds a site context once, a request context per inbound
//! request beneath it, and page or plain contexts (one per tag) beneath
//! that. Lookups start at the current context and walk towards the root,
//! nearest first.

pub mod chain;
pub mod factory;
pub mod kind;
pub mod tag;

pub use chain::{Ancestors, Context};
pub use kind::ContextKind;
pub use tag::{RequestTag, Tag};
