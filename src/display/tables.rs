//! Table formatting utilities for structured output.

use comfy_table::{
    Attribute, Cell, CellAlignment, Color, Table, modifiers::UTF8_ROUND_CORNERS,
    presets::UTF8_FULL,
};

use crate::session::HealthReport;
use crate::types::RankedEntry;

/// Rounded table with bold headers.
fn base_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
    );
    table
}

/// Ranking page whose first entry has 0-based rank `offset`.
///
/// Ranks are printed 1-based, like guess results.
pub fn create_ranking_table(entries: &[RankedEntry], offset: usize) -> String {
    let mut table = base_table(&["Rank", "Word", "Similarity"]);

    // Plain cells; comfy-table miscounts widths with ANSI codes
    for (i, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            Cell::new(offset + i + 1).set_alignment(CellAlignment::Right),
            Cell::new(&entry.word),
            Cell::new(format!("{:.4}", entry.score)).set_alignment(CellAlignment::Right),
        ]);
    }

    table.to_string()
}

pub fn create_health_table(report: &HealthReport) -> String {
    let mut table = base_table(&["Check", "Status"]);

    let status = |ok: bool| {
        if ok {
            Cell::new("✓ ready").fg(Color::Green)
        } else {
            Cell::new("✗ not ready").fg(Color::Red)
        }
    };

    table.add_row(vec![
        Cell::new("Vector store"),
        status(report.vector_store_ready),
    ]);
    table.add_row(vec![
        Cell::new("Ranking cache"),
        status(report.ranking_cache_ready),
    ]);
    table.add_row(vec![
        Cell::new("Active date"),
        Cell::new(
            report
                .active_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
    ]);

    table.to_string()
}
