//! Factory resolution
//!
//! Factory contexts (every kind but `Web`) try to construct a capability
//! before searching remembered values: a context whose kind, or a kind it
//! specializes, satisfies the key yields itself, otherwise the registry
//! adapts the context. Registry results are cached per context instance
//! and never inherited.
//!
//! An adapter may look the same key up again on the same context. While a
//! key is being constructed it is marked in progress on that context, and
//! a re-entrant lookup skips construction and goes straight to the
//! remembered values and the parent chain.

use crate::capability::{Capability, CapabilityKey, CapabilityRegistry};
use crate::context::{Context, ContextKind, Tag};
use crate::error::ContextError;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use tracing::{debug, trace};

pub(crate) struct FactoryState {
    pub(crate) registry: Rc<CapabilityRegistry>,
    cache: RefCell<HashMap<CapabilityKey, Capability>>,
    in_progress: RefCell<HashSet<CapabilityKey>>,
}

impl FactoryState {
    pub(crate) fn new(registry: Rc<CapabilityRegistry>) -> Self {
        Self {
            registry,
            cache: RefCell::new(HashMap::new()),
            in_progress: RefCell::new(HashSet::new()),
        }
    }

    fn cached(&self, key: &CapabilityKey) -> Option<Capability> {
        self.cache.borrow().get(key).cloned()
    }

    /// Mark `key` in progress; `None` if it already is.
    fn begin(&self, key: &CapabilityKey) -> Option<ConstructionGuard<'_>> {
        if !self.in_progress.borrow_mut().insert(key.clone()) {
            return None;
        }
        Some(ConstructionGuard {
            in_progress: &self.in_progress,
            key: key.clone(),
        })
    }
}

/// Clears the in-progress mark however construction ends.
struct ConstructionGuard<'a> {
    in_progress: &'a RefCell<HashSet<CapabilityKey>>,
    key: CapabilityKey,
}

impl Drop for ConstructionGuard<'_> {
    fn drop(&mut self) {
        self.in_progress.borrow_mut().remove(&self.key);
    }
}

impl Context {
    /// Context with on-demand capability construction through `registry`.
    pub fn factory(
        parent: Option<&Context>,
        tag: Option<Rc<dyn Tag>>,
        registry: Rc<CapabilityRegistry>,
    ) -> Context {
        Context::build(ContextKind::Factory, parent.cloned(), tag, Some(registry))
    }

    /// Registry of the nearest factory context, this one included.
    pub fn registry(&self) -> Option<Rc<CapabilityRegistry>> {
        self.lineage()
            .find_map(|ctx| ctx.0.factory.as_ref().map(|f| f.registry.clone()))
    }

    /// Value constructed and cached on this very context for `key`.
    pub fn cached(&self, key: &CapabilityKey) -> Option<Capability> {
        self.0.factory.as_ref()?.cached(key)
    }

    /// Whether `key` is being constructed on this context right now.
    pub fn is_constructing(&self, key: &CapabilityKey) -> bool {
        self.0
            .factory
            .as_ref()
            .map(|f| f.in_progress.borrow().contains(key))
            .unwrap_or(false)
    }

    /// Construction step of a lookup at this level.
    ///
    /// `Ok(None)` sends the lookup on to remembered values. Adapter
    /// failures propagate unchanged.
    pub(super) fn construct(&self, key: &CapabilityKey) -> Result<Option<Capability>, ContextError> {
        let factory = match &self.0.factory {
            Some(factory) => factory,
            None => return Ok(None),
        };

        if let Some(hit) = factory.cached(key) {
            trace!(capability = %key, kind = %self.0.kind, "Factory cache hit");
            return Ok(Some(hit));
        }

        if self
            .0
            .kind
            .supertypes()
            .iter()
            .any(|kind| kind.capability_key() == *key)
        {
            return Ok(Some(Capability::new(self.clone())));
        }

        let _guard = match factory.begin(key) {
            Some(guard) => guard,
            None => {
                trace!(capability = %key, kind = %self.0.kind, "Construction in progress; searching chain");
                return Ok(None);
            }
        };

        let constructed = factory
            .registry
            .get_adapter(self, key)
            .map_err(|source| ContextError::Construction {
                key: key.clone(),
                source,
            })?;

        match constructed {
            Some(value) => {
                debug!(capability = %key, kind = %self.0.kind, "Constructed capability");
                factory.cache.borrow_mut().insert(key.clone(), value.clone());
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }
}
