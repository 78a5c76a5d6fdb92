//! Capability registry: adapters from a context kind to a capability.
//!
//! A factory context consults its registry when a lookup misses its cache,
//! so capabilities can be produced on demand at render time instead of
//! being remembered up front.

use crate::capability::{Capability, CapabilityKey};
use crate::context::{Context, ContextKind, RequestTag};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Produces a capability from a context, `Ok(None)` when it cannot.
pub type Adapter = Rc<dyn Fn(&Context) -> anyhow::Result<Option<Capability>>>;

/// Maps (provider kind, capability key) to an adapter.
#[derive(Clone, Default)]
pub struct CapabilityRegistry {
    adapters: HashMap<(ContextKind, CapabilityKey), Adapter>,
}

impl CapabilityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the conventional adapters: a request
    /// context yields its own tag as the request object.
    pub fn with_conventions() -> Self {
        let mut registry = Self::new();
        registry.register(ContextKind::Request, CapabilityKey::REQUEST, |ctx| {
            Ok(ctx.tag().map(|tag| Capability::new(RequestTag(tag))))
        });
        registry
    }

    /// Register an adapter; a later registration for the same pair wins.
    pub fn register<F>(&mut self, kind: ContextKind, key: CapabilityKey, adapter: F)
    where
        F: Fn(&Context) -> anyhow::Result<Option<Capability>> + 'static,
    {
        self.adapters.insert((kind, key), Rc::new(adapter));
    }

    pub fn is_registered(&self, kind: ContextKind, key: &CapabilityKey) -> bool {
        self.adapters.contains_key(&(kind, key.clone()))
    }

    /// Adapt `context` into `key`.
    ///
    /// The adapter for the context's own kind wins; otherwise one
    /// registered for a kind it specializes applies. Returns `Ok(None)`
    /// when none is registered. Adapter failures are returned as-is.
    pub fn get_adapter(
        &self,
        context: &Context,
        key: &CapabilityKey,
    ) -> anyhow::Result<Option<Capability>> {
        let adapter = context
            .kind()
            .supertypes()
            .iter()
            .find_map(|kind| self.adapters.get(&(*kind, key.clone())));
        match adapter {
            Some(adapter) => adapter(context),
            None => Ok(None),
        }
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<String> = self
            .adapters
            .keys()
            .map(|(kind, key)| format!("{}->{}", kind, key))
            .collect();
        pairs.sort();
        f.debug_struct("CapabilityRegistry")
            .field("adapters", &pairs)
            .finish()
    }
}
