//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use preview_links::PreviewUrls;

/// One replayed change and the links after it.
pub struct SimulationStep {
    /// Human-readable description of the change.
    pub event: String,
    /// Whether the session recomputed its links.
    pub updated: bool,
    pub urls: PreviewUrls,
}

/// Format a link set the way the record sidebar labels it.
pub fn format_urls_table(urls: &PreviewUrls) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Link", "URL"]);
    table.add_row(vec!["Enable draft preview mode", urls.preview.as_str()]);
    table.add_row(vec!["Disable draft preview mode", urls.disable.as_str()]);
    table.add_row(vec!["View", urls.live.as_str()]);
    table
}

/// Format replayed changes, one row per event.
pub fn format_steps_table(steps: &[SimulationStep]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Change", "Preview", "Live"]);

    for (index, step) in steps.iter().enumerate() {
        let change = if step.updated {
            step.event.clone()
        } else {
            format!("{} (ignored)", step.event)
        };
        table.add_row(vec![
            index.to_string(),
            change,
            step.urls.preview.clone(),
            step.urls.live.clone(),
        ]);
    }

    table
}
