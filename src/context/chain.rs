//! The context chain
//!
//! A [`Context`] is a shared handle to one level of the chain. Each level
//! holds its remembered capabilities, its slot fills, the tag it wraps and
//! a link to its parent. Children never own their parents' tables; a
//! lookup that misses locally continues in the parent.

use crate::capability::{Capability, CapabilityKey, CapabilityRegistry, Provides};
use crate::context::factory::FactoryState;
use crate::context::{ContextKind, Tag};
use crate::error::ContextError;
use std::any::{type_name, Any};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

/// Shared handle to one level of a context chain.
///
/// `Clone` shares the level; use [`Context::clone_context`] to fork a chain.
#[derive(Clone)]
pub struct Context(pub(super) Rc<ContextNode>);

pub(super) struct ContextNode {
    pub(super) kind: ContextKind,
    pub(super) tag: Option<Rc<dyn Tag>>,
    pub(super) parent: RefCell<Option<Context>>,
    pub(super) remembrances: RefCell<Option<HashMap<CapabilityKey, Capability>>>,
    pub(super) slot_data: RefCell<Option<HashMap<String, Capability>>>,
    /// Present for every kind but `Web`
    pub(super) factory: Option<FactoryState>,
}

impl Context {
    pub(super) fn build(
        kind: ContextKind,
        parent: Option<Context>,
        tag: Option<Rc<dyn Tag>>,
        registry: Option<Rc<CapabilityRegistry>>,
    ) -> Context {
        let slot_data = tag.as_ref().and_then(|tag| tag.slot_data());
        let factory = if kind.is_factory() {
            let registry =
                registry.unwrap_or_else(|| Rc::new(CapabilityRegistry::with_conventions()));
            Some(FactoryState::new(registry))
        } else {
            None
        };
        Context(Rc::new(ContextNode {
            kind,
            tag,
            parent: RefCell::new(parent),
            remembrances: RefCell::new(None),
            slot_data: RefCell::new(slot_data),
            factory,
        }))
    }

    /// Plain context over `tag`. A context without a tag is a marker.
    pub fn new(parent: Option<&Context>, tag: Option<Rc<dyn Tag>>) -> Context {
        Context::build(ContextKind::Web, parent.cloned(), tag, None)
    }

    /// Plain child context of this one.
    pub fn child(&self, tag: Option<Rc<dyn Tag>>) -> Context {
        Context::new(Some(self), tag)
    }

    pub fn kind(&self) -> ContextKind {
        self.0.kind
    }

    pub fn tag(&self) -> Option<Rc<dyn Tag>> {
        self.0.tag.clone()
    }

    pub fn parent(&self) -> Option<Context> {
        self.0.parent.borrow().clone()
    }

    /// Marker contexts wrap no tag; [`Context::chain`] splices above them.
    pub fn is_marker(&self) -> bool {
        self.0.tag.is_none()
    }

    pub fn ptr_eq(&self, other: &Context) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Contexts strictly above this one, nearest first.
    pub fn ancestors(&self) -> Ancestors {
        Ancestors {
            current: Some(self.clone()),
            started: true,
        }
    }

    /// This context followed by its ancestors.
    pub fn lineage(&self) -> Ancestors {
        Ancestors {
            current: Some(self.clone()),
            started: false,
        }
    }

    /// Number of links between this context and the root.
    pub fn depth_to_root(&self) -> usize {
        self.ancestors().count()
    }

    fn set_parent(&self, parent: Option<Context>) {
        *self.0.parent.borrow_mut() = parent;
    }

    /// Remember `value` under every capability it declares, or under
    /// [`CapabilityKey::DATA`] when it declares none.
    pub fn remember<T: Provides>(&self, value: T) -> &Self {
        let keys = value.provided_capabilities();
        self.store(keys, Capability::new(value))
    }

    /// Like [`Context::remember`] for a value that is already shared.
    pub fn remember_rc<T: Provides>(&self, value: Rc<T>) -> &Self {
        let keys = value.provided_capabilities();
        self.store(keys, Capability::from_rc(value))
    }

    /// Remember `value` under exactly `key`.
    pub fn remember_as<T: Any>(&self, key: CapabilityKey, value: T) -> &Self {
        self.store(vec![key], Capability::new(value))
    }

    /// Remember an erased value under `key`, or the default key.
    pub fn remember_capability(&self, value: Capability, key: Option<CapabilityKey>) -> &Self {
        self.store(key.into_iter().collect(), value)
    }

    fn store(&self, mut keys: Vec<CapabilityKey>, value: Capability) -> &Self {
        if keys.is_empty() {
            keys.push(CapabilityKey::DATA);
        }
        let mut table = self.0.remembrances.borrow_mut();
        let table = table.get_or_insert_with(HashMap::new);
        for key in keys {
            trace!(capability = %key, kind = %self.0.kind, "Remembering capability");
            table.insert(key, value.clone());
        }
        self
    }

    /// Value remembered on this very context, ignoring ancestors.
    pub fn remembered(&self, key: &CapabilityKey) -> Option<Capability> {
        self.0.remembrances.borrow().as_ref()?.get(key).cloned()
    }

    /// Keys remembered on this very context, sorted by name.
    pub fn remembered_keys(&self) -> Vec<CapabilityKey> {
        let mut keys: Vec<CapabilityKey> = self
            .0
            .remembrances
            .borrow()
            .as_ref()
            .map(|table| table.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort_by(|a, b| a.name().cmp(b.name()));
        keys
    }

    /// Nearest value for `key`, from this context or an ancestor.
    pub fn locate(&self, key: &CapabilityKey) -> Result<Capability, ContextError> {
        self.locate_at(key, 1)?
            .ok_or_else(|| ContextError::CapabilityNotFound(key.clone()))
    }

    /// The `depth`-th value for `key` counting from the nearest.
    ///
    /// A positive depth either finds a value or fails with
    /// `CapabilityNotFound`. A negative depth counts from the root-most
    /// match (`-1` is the most distant) and yields `None` when there are
    /// too few matches. A factory construction ends the walk wherever it
    /// happens, regardless of `depth`.
    pub fn locate_at(
        &self,
        key: &CapabilityKey,
        depth: isize,
    ) -> Result<Option<Capability>, ContextError> {
        trace!(capability = %key, depth, kind = %self.0.kind, "Locating capability");
        if depth < 0 {
            return self.locate_from_root(key, depth);
        }

        let mut remaining = depth;
        for ctx in self.lineage() {
            if let Some(constructed) = ctx.construct(key)? {
                return Ok(Some(constructed));
            }
            if let Some(found) = ctx.remembered(key) {
                remaining -= 1;
                if remaining == 0 {
                    return Ok(Some(found));
                }
            }
        }
        Err(ContextError::CapabilityNotFound(key.clone()))
    }

    fn locate_from_root(
        &self,
        key: &CapabilityKey,
        depth: isize,
    ) -> Result<Option<Capability>, ContextError> {
        let mut matches = Vec::new();
        for ctx in self.lineage() {
            if let Some(constructed) = ctx.construct(key)? {
                matches.push(constructed);
                break;
            }
            if let Some(found) = ctx.remembered(key) {
                matches.push(found);
            }
        }
        let index = matches.len() as isize + depth;
        if index < 0 {
            return Ok(None);
        }
        Ok(matches.into_iter().nth(index as usize))
    }

    /// [`Context::locate`] with a typed result.
    pub fn locate_as<T: Any>(&self, key: &CapabilityKey) -> Result<Rc<T>, ContextError> {
        self.locate(key)?
            .downcast::<T>()
            .ok_or_else(|| ContextError::TypeMismatch {
                key: key.clone(),
                expected: type_name::<T>(),
            })
    }

    /// [`Context::locate`] that reports a missing capability as `None`.
    /// Construction failures still propagate.
    pub fn get_component(&self, key: &CapabilityKey) -> Result<Option<Capability>, ContextError> {
        match self.locate(key) {
            Ok(found) => Ok(Some(found)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set the filler for every slot named `name` below this context.
    pub fn fill_slots<T: Any>(&self, name: impl Into<String>, value: T) -> &Self {
        self.fill_slot_capability(name, Capability::new(value))
    }

    pub fn fill_slot_capability(&self, name: impl Into<String>, value: Capability) -> &Self {
        self.0
            .slot_data
            .borrow_mut()
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value);
        self
    }

    /// Nearest filler for slot `name`.
    pub fn locate_slot_data(&self, name: &str) -> Result<Capability, ContextError> {
        for ctx in self.lineage() {
            if let Some(found) = ctx.own_slot(name) {
                return Ok(found);
            }
        }
        Err(ContextError::SlotNotFilled(name.to_string()))
    }

    fn own_slot(&self, name: &str) -> Option<Capability> {
        self.0.slot_data.borrow().as_ref()?.get(name).cloned()
    }

    /// Slot names filled on this very context, sorted.
    pub fn slot_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .0
            .slot_data
            .borrow()
            .as_ref()
            .map(|slots| slots.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Continue this chain into `other`.
    ///
    /// Walks up to the highest context that is not directly below a marker
    /// and makes `other` its parent. Does nothing when `other` is already
    /// in this chain, or when the splice would create a cycle.
    pub fn chain(&self, other: &Context) {
        let mut top = self.clone();
        while let Some(parent) = top.parent() {
            if parent.is_marker() {
                break;
            }
            top = parent;
            if top.ptr_eq(other) {
                debug!(onto = %other.kind(), "Context already chained");
                return;
            }
        }
        if other.lineage().any(|ctx| ctx.ptr_eq(&top)) {
            debug!(top = %top.kind(), onto = %other.kind(), "Chaining would create a cycle; ignoring");
            return;
        }
        debug!(top = %top.kind(), onto = %other.kind(), "Chaining context");
        top.set_parent(Some(other.clone()));
    }

    /// Fork this context and its ancestors.
    ///
    /// Every level gets its own remembrance and slot tables holding the
    /// same values. Only this context's tag is cloned, and only when
    /// `clone_tags` is set; `deep` is passed on to the tag. Factory caches
    /// start empty.
    pub fn clone_context(&self, deep: bool, clone_tags: bool) -> Context {
        let ancestors: Vec<Context> = self.ancestors().collect();
        let mut parent = None;
        for level in ancestors.iter().rev() {
            parent = Some(level.fork_level(level.tag(), parent));
        }
        let tag = match &self.0.tag {
            Some(tag) if clone_tags => Some(tag.clone_tag(deep)),
            tag => tag.clone(),
        };
        self.fork_level(tag, parent)
    }

    fn fork_level(&self, tag: Option<Rc<dyn Tag>>, parent: Option<Context>) -> Context {
        Context(Rc::new(ContextNode {
            kind: self.0.kind,
            tag,
            parent: RefCell::new(parent),
            remembrances: RefCell::new(self.0.remembrances.borrow().clone()),
            slot_data: RefCell::new(self.0.slot_data.borrow().clone()),
            factory: self
                .0
                .factory
                .as_ref()
                .map(|factory| FactoryState::new(factory.registry.clone())),
        }))
    }
}

impl Drop for ContextNode {
    /// Release the levels above one at a time instead of recursively.
    fn drop(&mut self) {
        let mut next = self.parent.get_mut().take();
        while let Some(Context(node)) = next {
            next = match Rc::try_unwrap(node) {
                Ok(mut level) => level.parent.get_mut().take(),
                Err(_) => None,
            };
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("kind", &self.0.kind)
            .field("tag", &self.0.tag)
            .field("remembered", &self.remembered_keys())
            .field("slots", &self.slot_names())
            .field("parent", &self.parent().map(|parent| parent.kind()))
            .finish()
    }
}

/// Iterator over a context and/or its ancestors.
///
/// The next parent is read only when asked for, so a splice made while
/// visiting a context is followed.
pub struct Ancestors {
    current: Option<Context>,
    started: bool,
}

impl Iterator for Ancestors {
    type Item = Context;

    fn next(&mut self) -> Option<Context> {
        if self.started {
            self.current = self.current.take()?.parent();
        }
        self.started = true;
        self.current.clone()
    }
}
