//! Site bootstrap: the root context built from configuration.

use crate::capability::{CapabilityKey, CapabilityRegistry};
use crate::config::SiteConfig;
use crate::context::Context;
use std::rc::Rc;
use tracing::debug;

/// Create the root site context for `site`.
///
/// Each `remember` entry is stored as a `String` under the named key of
/// the same name; each `slots` entry fills the slot of that name.
pub fn build_site_context(site: &SiteConfig, registry: Rc<CapabilityRegistry>) -> Context {
    let context = Context::site(registry);

    for (key, value) in &site.remember {
        context.remember_as(CapabilityKey::named(key.clone()), value.clone());
    }
    for (name, value) in &site.slots {
        context.fill_slots(name.clone(), value.clone());
    }

    debug!(
        site = %site.name,
        remembered = site.remember.len(),
        slots = site.slots.len(),
        "Built site context"
    );
    context
}
