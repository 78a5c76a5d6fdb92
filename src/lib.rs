//! Trellis: rendering contexts for server-side templates
//!
//! A chain of contexts mirrors the nesting of a render: a site context at
//! the root, a request context per inbound request, a page context per
//! render pass and a plain context per tag. Each level remembers
//! capabilities by key and fills named slots; lookups search from the
//! current level toward the root. Factory levels construct capabilities on
//! demand through a [`capability::CapabilityRegistry`].

pub mod capability;
pub mod cli;
pub mod config;
pub mod context;
pub mod dom;
pub mod error;
pub mod logging;
pub mod site;

pub use capability::{Capability, CapabilityKey, CapabilityRegistry, Provides};
pub use context::{Context, ContextKind, RequestTag, Tag};
pub use error::{ApiError, ContextError, DomError};
