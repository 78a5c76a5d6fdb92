//! CLI route: single route table and run context.

use crate::capability::{CapabilityKey, CapabilityRegistry};
use crate::cli::parse::Commands;
use crate::cli::presentation::{format_capability, format_site_summary, SiteSummary};
use crate::cli::command_name;
use crate::config::{ConfigLoader, TrellisConfig};
use crate::context::Context;
use crate::error::{ApiError, ContextError};
use crate::site::build_site_context;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info};

/// Runtime context for CLI execution: the loaded configuration and the
/// site context built from it.
pub struct RunContext {
    workspace_root: PathBuf,
    config: TrellisConfig,
    site: Context,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        let config = config.validated()?;

        let registry = Rc::new(CapabilityRegistry::with_conventions());
        let site = build_site_context(&config.site, registry);

        Ok(Self {
            workspace_root,
            config,
            site,
        })
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn config(&self) -> &TrellisConfig {
        &self.config
    }

    pub fn site(&self) -> &Context {
        &self.site
    }

    /// Run one command and return its printable output.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        info!(command = command_name(command), "Executing command");
        match command {
            Commands::Show { format } => {
                let summary = SiteSummary::from_context(&self.config.site.name, &self.site);
                format_site_summary(&summary, format)
            }
            Commands::Locate { key, depth } => self.handle_locate(key, *depth),
            Commands::Slot { name } => {
                let page = Context::page(&self.site, None);
                let value = page.locate_slot_data(name)?;
                Ok(format_capability(&value))
            }
        }
    }

    fn handle_locate(&self, key: &str, depth: isize) -> Result<String, ApiError> {
        let key = CapabilityKey::named(key.to_string());
        let page = Context::page(&self.site, None);
        debug!(capability = %key, depth, "Locating from page context");
        match page.locate_at(&key, depth)? {
            Some(value) => Ok(format_capability(&value)),
            None => Err(ContextError::CapabilityNotFound(key).into()),
        }
    }
}
