//! Configuration System
//!
//! Layered configuration for a site: defaults, the global user file, the
//! workspace files and finally `TRELLIS__*` environment variables. The
//! `site` section describes what the root site context remembers; the
//! `logging` section feeds [`crate::logging::init_logging`].

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

mod merge;
mod sources;

pub use sources::environment::{ENV_PREFIX, ENV_SEPARATOR};
pub use sources::workspace_file::ENV_NAME_VAR;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrellisConfig {
    /// Site context setup
    #[serde(default)]
    pub site: SiteConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Sitewide values for the root context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Display name of the site
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Values remembered on the site context, keyed by capability name
    #[serde(default)]
    pub remember: BTreeMap<String, String>,

    /// Slots filled on the site context
    #[serde(default)]
    pub slots: BTreeMap<String, String>,
}

fn default_site_name() -> String {
    "trellis".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            remember: BTreeMap::new(),
            slots: BTreeMap::new(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Site(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Site(msg) => write!(f, "Site: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl SiteConfig {
    /// Validate site configuration
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(ValidationError::Site("name cannot be empty".to_string()));
        }
        for key in self.remember.keys() {
            if key.trim().is_empty() {
                errors.push(ValidationError::Site(
                    "remembered capability names cannot be empty".to_string(),
                ));
            }
        }
        for name in self.slots.keys() {
            if name.trim().is_empty() {
                errors.push(ValidationError::Site("slot names cannot be empty".to_string()));
            }
        }
        errors
    }
}

impl TrellisConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = self.site.validate();

        if let Err(e) = crate::logging::validate_config(&self.logging) {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, folding every problem into one [`ApiError::ConfigError`].
    pub fn validated(self) -> Result<Self, ApiError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(self)
    }
}

/// Loads [`TrellisConfig`] from its layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence, lowest first: defaults, global file, `config/config.toml`,
    /// `config/{TRELLIS_ENV}.toml`, `TRELLIS__*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<TrellisConfig, ApiError> {
        let builder = merge::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder);
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root);
        let builder = sources::environment::add_to_builder(builder);
        Ok(builder.build()?.try_deserialize()?)
    }

    /// Load configuration from one explicit file on top of the defaults.
    ///
    /// Environment overrides still apply.
    pub fn load_from_file(path: &Path) -> Result<TrellisConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = merge::builder_with_defaults()?
            .add_source(config::File::from(path.to_path_buf()).required(true));
        let builder = sources::environment::add_to_builder(builder);
        Ok(builder.build()?.try_deserialize()?)
    }

    /// Location of the global config file, whether or not it exists.
    pub fn xdg_config_path() -> Option<PathBuf> {
        sources::global_file::global_config_path()
    }
}
