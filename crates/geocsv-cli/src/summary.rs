use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Counters for one import run.
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub table: String,
    pub dry_run: bool,
    pub rows_read: u64,
    pub rows_written: u64,
    pub adjusted: u64,
    pub no_data: u64,
}

pub fn print_summary(summary: &ImportSummary) {
    println!("Table: {}", summary.table);
    if summary.dry_run {
        println!("Dry run: nothing was written");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows read"),
        header_cell("Rows written"),
        header_cell("Adjusted to 100"),
        header_cell("No data"),
    ]);
    apply_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(summary.rows_read),
        Cell::new(summary.rows_written),
        count_cell(summary.adjusted, Color::Yellow),
        count_cell(summary.no_data, Color::DarkGrey),
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(value: u64, color: Color) -> Cell {
    if value > 0 {
        Cell::new(value).fg(color)
    } else {
        Cell::new(value).fg(Color::DarkGrey)
    }
}
