//! Environment source: TRELLIS__SECTION__KEY variables.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

/// Prefix of overriding variables, e.g. `TRELLIS__SITE__NAME`
pub const ENV_PREFIX: &str = "TRELLIS";

/// Separator between the prefix and nested key segments
pub const ENV_SEPARATOR: &str = "__";

/// Add the environment source to builder. Highest precedence.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR),
    )
}
