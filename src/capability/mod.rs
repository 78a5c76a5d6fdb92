//! Capabilities: the keys contexts remember values under, the erased
//! values themselves, and the registry that lazily adapts a context into
//! a capability.

pub mod key;
pub mod registry;
pub mod value;

pub use key::CapabilityKey;
pub use registry::{Adapter, CapabilityRegistry};
pub use value::{Capability, Provides};
