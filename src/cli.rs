//! CLI domain: parse, route, help, output, and presentation only.
//! Route handlers build contexts from configuration and delegate lookups to them.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{format_capability, format_site_summary, SiteSummary};
pub use route::RunContext;
