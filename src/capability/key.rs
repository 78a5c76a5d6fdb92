//! Capability keys

use serde::{Serialize, Serializer};
use std::any::{type_name, TypeId};
use std::borrow::Cow;
use std::fmt;

/// Stable, hashable identifier of a capability.
///
/// Keys derived from a Rust type compare by `TypeId`; named keys compare
/// by name. The two forms never compare equal to each other.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum CapabilityKey {
    Type { id: TypeId, name: &'static str },
    Named(Cow<'static, str>),
}

impl CapabilityKey {
    pub const SESSION: CapabilityKey = CapabilityKey::Named(Cow::Borrowed("session"));
    pub const FORM_DEFAULTS: CapabilityKey = CapabilityKey::Named(Cow::Borrowed("form-defaults"));
    pub const FORM_ERRORS: CapabilityKey = CapabilityKey::Named(Cow::Borrowed("form-errors"));
    pub const HAND: CapabilityKey = CapabilityKey::Named(Cow::Borrowed("hand"));
    pub const STATUS_MESSAGE: CapabilityKey =
        CapabilityKey::Named(Cow::Borrowed("status-message"));
    pub const RENDERER: CapabilityKey = CapabilityKey::Named(Cow::Borrowed("renderer"));
    pub const RENDERER_FACTORY: CapabilityKey =
        CapabilityKey::Named(Cow::Borrowed("renderer-factory"));
    pub const REQUEST: CapabilityKey = CapabilityKey::Named(Cow::Borrowed("request"));
    /// Fallback key for values that declare no capabilities of their own.
    pub const DATA: CapabilityKey = CapabilityKey::Named(Cow::Borrowed("data"));

    /// Key derived from a Rust type.
    pub fn of<T: ?Sized + 'static>() -> Self {
        CapabilityKey::Type {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Key identified by name, e.g. a fully-qualified interface name.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        CapabilityKey::Named(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            CapabilityKey::Type { name, .. } => name,
            CapabilityKey::Named(name) => name,
        }
    }
}

impl fmt::Display for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Debug for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityKey::Type { name, .. } => write!(f, "CapabilityKey::of::<{}>", name),
            CapabilityKey::Named(name) => write!(f, "CapabilityKey::named({:?})", name),
        }
    }
}

impl Serialize for CapabilityKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
