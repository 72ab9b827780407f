use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::commands::RunOutcome;

pub fn print_summary(outcome: &RunOutcome) {
    println!("Source: {}", outcome.source);
    println!("Input:  {}", outcome.input.display());
    println!("Output: {}", outcome.output.display());
    let summary = &outcome.summary;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Count")]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table.add_row(vec![Cell::new("Rows read"), Cell::new(summary.rows_read)]);
    table.add_row(vec![
        Cell::new("Rows emitted"),
        Cell::new(summary.rows_emitted),
    ]);
    table.add_row(vec![
        Cell::new("Dropped (malformed)"),
        count_cell(summary.malformed, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Dropped (duplicate)"),
        count_cell(summary.duplicates, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Recovered date ranges"),
        count_cell(summary.invalid_date_range, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Incomplete (kept)"),
        count_cell(summary.incomplete, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Warnings"),
        count_cell(summary.warnings, Color::Yellow),
    ]);
    println!("{table}");
    if outcome.error_rate_exceeded {
        eprintln!(
            "error: malformed-row rate {:.1}% exceeds the configured threshold",
            summary.malformed_rate() * 100.0
        );
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(value: usize, color: Color) -> Cell {
    if value > 0 {
        Cell::new(value).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(value).add_attribute(Attribute::Dim)
    }
}
