//! Type-erased capability values

use crate::capability::CapabilityKey;
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// A remembered or constructed value.
///
/// Handles are reference counted: cloning a handle (or a table of them)
/// shares the value, so interior mutation through one holder is visible
/// through every other.
#[derive(Clone)]
pub struct Capability(Rc<dyn Any>);

impl Capability {
    pub fn new<T: Any>(value: T) -> Self {
        Capability(Rc::new(value))
    }

    pub fn from_rc<T: Any>(value: Rc<T>) -> Self {
        Capability(value)
    }

    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    pub fn downcast<T: Any>(&self) -> Option<Rc<T>> {
        self.0.clone().downcast::<T>().ok()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Whether both handles point at the same value.
    pub fn ptr_eq(a: &Capability, b: &Capability) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(s) = self.downcast_ref::<String>() {
            return write!(f, "Capability({:?})", s);
        }
        f.write_str("Capability(..)")
    }
}

/// A value's declared capability set.
///
/// `Context::remember` stores the value under every key returned here,
/// or under [`CapabilityKey::DATA`] when the set is empty.
pub trait Provides: Any {
    fn provided_capabilities(&self) -> Vec<CapabilityKey> {
        Vec::new()
    }
}

impl Provides for String {}
