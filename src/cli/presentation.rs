//! CLI presentation: text, json and toml formatters.

use crate::capability::Capability;
use crate::context::Context;
use crate::error::ApiError;
use comfy_table::Table;
use serde::Serialize;
use std::collections::BTreeMap;

/// What a site context holds, in printable form.
#[derive(Debug, Clone, Serialize)]
pub struct SiteSummary {
    pub name: String,
    pub kind: String,
    pub remembered: BTreeMap<String, String>,
    pub slots: BTreeMap<String, String>,
}

impl SiteSummary {
    /// Summarize the values stored directly on `context`.
    pub fn from_context(name: &str, context: &Context) -> Self {
        let remembered = context
            .remembered_keys()
            .into_iter()
            .filter_map(|key| {
                let value = context.remembered(&key)?;
                Some((key.name().to_string(), format_capability(&value)))
            })
            .collect();
        let slots = context
            .slot_names()
            .into_iter()
            .filter_map(|slot| {
                let value = context.locate_slot_data(&slot).ok()?;
                Some((slot, format_capability(&value)))
            })
            .collect();
        Self {
            name: name.to_string(),
            kind: context.kind().to_string(),
            remembered,
            slots,
        }
    }
}

/// Printable form of a capability value.
pub fn format_capability(value: &Capability) -> String {
    match value.downcast_ref::<String>() {
        Some(text) => text.clone(),
        None => format!("{:?}", value),
    }
}

/// Render a summary as `text` (table), `json` or `toml`.
pub fn format_site_summary(summary: &SiteSummary, format: &str) -> Result<String, ApiError> {
    match format {
        "json" => serde_json::to_string_pretty(summary)
            .map_err(|e| ApiError::OutputError(e.to_string())),
        "toml" => toml::to_string_pretty(summary).map_err(|e| ApiError::OutputError(e.to_string())),
        _ => Ok(format_site_summary_text(summary)),
    }
}

fn format_site_summary_text(summary: &SiteSummary) -> String {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Entry", "Name", "Value"]);
    for (key, value) in &summary.remembered {
        table.add_row(vec!["capability", key.as_str(), value.as_str()]);
    }
    for (slot, value) in &summary.slots {
        table.add_row(vec!["slot", slot.as_str(), value.as_str()]);
    }
    format!("Site: {} ({})\n{}", summary.name, summary.kind, table)
}
