//! Context kinds and the specialized site, request and page contexts.

use crate::capability::{CapabilityKey, CapabilityRegistry};
use crate::context::{Context, RequestTag, Tag};
use crate::error::ContextError;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

/// Concrete type of a context.
///
/// Every kind except `Web` resolves capabilities through a registry
/// before searching remembered values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    /// Plain context, one per tag during a render
    Web,
    /// Context with on-demand capability construction
    Factory,
    /// Root of every chain; sitewide remembrances
    Site,
    /// One per inbound request, beneath the site context
    Request,
    /// One per render pass, beneath a request context
    Page,
}

impl ContextKind {
    pub fn is_factory(&self) -> bool {
        !matches!(self, ContextKind::Web)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContextKind::Web => "web",
            ContextKind::Factory => "factory",
            ContextKind::Site => "site",
            ContextKind::Request => "request",
            ContextKind::Page => "page",
        }
    }

    /// This kind followed by the kinds it specializes, most specific first.
    ///
    /// Site, request and page contexts are factory contexts too.
    pub fn supertypes(&self) -> &'static [ContextKind] {
        match self {
            ContextKind::Web => &[ContextKind::Web],
            ContextKind::Factory => &[ContextKind::Factory],
            ContextKind::Site => &[ContextKind::Site, ContextKind::Factory],
            ContextKind::Request => &[ContextKind::Request, ContextKind::Factory],
            ContextKind::Page => &[ContextKind::Page, ContextKind::Factory],
        }
    }

    /// Whether a context of this kind also counts as `other`.
    pub fn is_a(&self, other: ContextKind) -> bool {
        self.supertypes().contains(&other)
    }

    /// Key a factory context of this kind satisfies by itself.
    pub fn capability_key(&self) -> CapabilityKey {
        let name = match self {
            ContextKind::Web => "context.web",
            ContextKind::Factory => "context.factory",
            ContextKind::Site => "context.site",
            ContextKind::Request => "context.request",
            ContextKind::Page => "context.page",
        };
        CapabilityKey::Named(Cow::Borrowed(name))
    }
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Context {
    /// Root site context. Holds sitewide remembrances; has no tag.
    pub fn site(registry: Rc<CapabilityRegistry>) -> Context {
        Context::build(ContextKind::Site, None, None, Some(registry))
    }

    /// Per-request context wrapping the request object as its tag.
    ///
    /// Inherits the nearest registry above it, or the conventional
    /// registry when the chain has none.
    pub fn request(parent: &Context, request: Rc<dyn Tag>) -> Context {
        let registry = parent
            .registry()
            .unwrap_or_else(|| Rc::new(CapabilityRegistry::with_conventions()));
        Context::build(
            ContextKind::Request,
            Some(parent.clone()),
            Some(request),
            Some(registry),
        )
    }

    /// Per-render-pass context beneath a request context.
    pub fn page(parent: &Context, tag: Option<Rc<dyn Tag>>) -> Context {
        let registry = parent
            .registry()
            .unwrap_or_else(|| Rc::new(CapabilityRegistry::with_conventions()));
        Context::build(ContextKind::Page, Some(parent.clone()), tag, Some(registry))
    }

    /// Nearest request context strictly above this one.
    pub fn request_context(&self) -> Result<Context, ContextError> {
        self.ancestors()
            .find(|ctx| ctx.kind() == ContextKind::Request)
            .ok_or(ContextError::NoRequestContext)
    }

    /// Named query argument of the request this context renders for.
    pub fn arg(&self, name: &str, default: Option<&str>) -> Result<Option<String>, ContextError> {
        let request = self.locate_as::<RequestTag>(&CapabilityKey::REQUEST)?;
        Ok(request.arg(name).or_else(|| default.map(str::to_string)))
    }
}
