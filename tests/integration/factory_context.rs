//! On-demand construction through a capability registry

use anyhow::anyhow;
use std::cell::Cell;
use std::rc::Rc;
use trellis::capability::{Capability, CapabilityKey, CapabilityRegistry};
use trellis::context::{Context, ContextKind};
use trellis::error::ContextError;

#[derive(Debug)]
struct Renderer {
    for_kind: ContextKind,
}

fn renderer_registry(calls: Rc<Cell<u32>>) -> Rc<CapabilityRegistry> {
    let mut registry = CapabilityRegistry::with_conventions();
    registry.register(ContextKind::Page, CapabilityKey::RENDERER, move |ctx| {
        calls.set(calls.get() + 1);
        Ok(Some(Capability::new(Renderer {
            for_kind: ctx.kind(),
        })))
    });
    Rc::new(registry)
}

#[test]
fn test_adapter_runs_once_per_context() {
    let calls = Rc::new(Cell::new(0));
    let site = Context::site(renderer_registry(calls.clone()));
    let page = Context::page(&site, None);
    let tag_ctx = page.child(None);

    let first = tag_ctx.locate_as::<Renderer>(&CapabilityKey::RENDERER).unwrap();
    let second = tag_ctx.locate_as::<Renderer>(&CapabilityKey::RENDERER).unwrap();
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(first.for_kind, ContextKind::Page);
    assert_eq!(calls.get(), 1);

    let other_page = Context::page(&site, None);
    other_page.locate(&CapabilityKey::RENDERER).unwrap();
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_adapter_only_applies_to_its_kind() {
    let calls = Rc::new(Cell::new(0));
    let site = Context::site(renderer_registry(calls.clone()));

    assert!(site.get_component(&CapabilityKey::RENDERER).unwrap().is_none());
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_construction_is_terminal_at_any_depth() {
    let calls = Rc::new(Cell::new(0));
    let site = Context::site(renderer_registry(calls));
    site.remember_as(CapabilityKey::RENDERER, "site renderer".to_string());
    let page = Context::page(&site, None);
    let leaf = page.child(None);
    leaf.remember_as(CapabilityKey::RENDERER, "leaf renderer".to_string());

    let nearest = leaf.locate(&CapabilityKey::RENDERER).unwrap();
    assert!(nearest.is::<String>());
    let second = leaf.locate_at(&CapabilityKey::RENDERER, 2).unwrap().unwrap();
    assert!(second.is::<Renderer>());
    let third = leaf.locate_at(&CapabilityKey::RENDERER, 3).unwrap().unwrap();
    assert!(Capability::ptr_eq(&second, &third));

    // The site's value is hidden behind the construction
    let most_distant = leaf.locate_at(&CapabilityKey::RENDERER, -1).unwrap().unwrap();
    assert!(most_distant.is::<Renderer>());
}

#[test]
fn test_failed_construction_aborts_lookup() {
    let mut registry = CapabilityRegistry::new();
    registry.register(ContextKind::Site, CapabilityKey::SESSION, |_| {
        Err(anyhow!("session store unavailable"))
    });
    let site = Context::site(Rc::new(registry));
    let leaf = site.child(None);

    let err = leaf.get_component(&CapabilityKey::SESSION).unwrap_err();
    match err {
        ContextError::Construction { key, source } => {
            assert_eq!(key, CapabilityKey::SESSION);
            assert_eq!(source.to_string(), "session store unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_adapter_may_wrap_value_from_parent_chain() {
    let mut registry = CapabilityRegistry::new();
    registry.register(ContextKind::Page, CapabilityKey::STATUS_MESSAGE, |ctx| {
        let inherited = ctx.locate_as::<String>(&CapabilityKey::STATUS_MESSAGE)?;
        Ok(Some(Capability::new(format!("[page] {}", inherited))))
    });
    let registry = Rc::new(registry);
    let site = Context::site(registry);
    site.remember_as(CapabilityKey::STATUS_MESSAGE, "Saved".to_string());
    let page = Context::page(&site, None);

    let message = page.locate_as::<String>(&CapabilityKey::STATUS_MESSAGE).unwrap();
    assert_eq!(message.as_str(), "[page] Saved");
    assert!(!page.is_constructing(&CapabilityKey::STATUS_MESSAGE));
}

#[test]
fn test_factory_context_adapts_to_itself() {
    let site = Context::site(Rc::new(CapabilityRegistry::new()));
    let page = Context::page(&site, None);
    let leaf = page.child(None);

    let found = leaf
        .locate_as::<Context>(&ContextKind::Site.capability_key())
        .unwrap();
    assert!(found.ptr_eq(&site));
    assert!(site.cached(&ContextKind::Site.capability_key()).is_none());
}
