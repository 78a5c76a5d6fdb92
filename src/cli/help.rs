//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::Commands;

/// Command name string for log events (e.g. "show", "locate").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Show { .. } => "show",
        Commands::Locate { .. } => "locate",
        Commands::Slot { .. } => "slot",
    }
}
