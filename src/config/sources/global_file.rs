//! Global config file source: $XDG_CONFIG_HOME/trellis/config.toml or
//! ~/.config/trellis/config.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::File;
use directories::BaseDirs;
use std::path::PathBuf;
use tracing::debug;

/// Path to global config file.
///
/// `XDG_CONFIG_HOME` wins when set and non-empty; otherwise `$HOME/.config`,
/// falling back to the platform home directory when `HOME` is unset.
pub fn global_config_path() -> Option<PathBuf> {
    let config_home = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let home = std::env::var("HOME")
                .ok()
                .filter(|home| !home.is_empty())
                .map(PathBuf::from)
                .or_else(|| BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()))?;
            home.join(".config")
        }
    };
    Some(config_home.join("trellis").join("config.toml"))
}

/// Add global config file source to builder if it exists.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    match global_config_path() {
        Some(path) if path.exists() => {
            let path = path.canonicalize().unwrap_or(path);
            builder.add_source(File::from(path).required(false))
        }
        Some(path) => {
            debug!(config_path = %path.display(), "No global configuration file");
            builder
        }
        None => builder,
    }
}
