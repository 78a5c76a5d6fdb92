//! The node a context wraps

use crate::capability::Capability;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A tag a context is built over: a document node, a request, or any
/// other object the render is currently positioned at.
///
/// The context never looks into the tag beyond these methods.
pub trait Tag: fmt::Debug {
    /// Slot fills carried by the tag itself, used to seed a new context.
    fn slot_data(&self) -> Option<HashMap<String, Capability>> {
        None
    }

    /// Copy the tag; `deep` also copies its subtree.
    fn clone_tag(&self, deep: bool) -> Rc<dyn Tag>;

    /// Named query argument, for tags that stand for a request.
    fn query_arg(&self, _name: &str) -> Option<String> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

/// The request object a request context yields for
/// [`CapabilityKey::REQUEST`](crate::capability::CapabilityKey::REQUEST).
#[derive(Debug, Clone)]
pub struct RequestTag(pub Rc<dyn Tag>);

impl RequestTag {
    pub fn arg(&self, name: &str) -> Option<String> {
        self.0.query_arg(name)
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}
