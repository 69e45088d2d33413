use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use billtrack_model::{MatchField, PatternSet};

use crate::types::MatchRunResult;

pub fn print_summary(result: &MatchRunResult) {
    println!("Billing: {}", result.billing.display());
    println!(
        "Dictionary: {} ({} patterns)",
        result.patterns.display(),
        result.pattern_count
    );
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: - (dry run)"),
    }
    if let Some(path) = &result.audit {
        println!("Audit: {}", path.display());
    }
    println!("{}", summary_table(result));
    if !result.summary.by_label.is_empty() {
        println!();
        println!("Labels:");
        println!("{}", label_table(result));
    }
}

/// Row counts and the field that decided each match.
pub fn summary_table(result: &MatchRunResult) -> Table {
    let summary = &result.summary;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    table.add_row(vec![Cell::new("Total"), Cell::new(summary.rows)]);
    table.add_row(vec![
        Cell::new("Matched"),
        Cell::new(summary.matched).fg(Color::Green),
    ]);
    table.add_row(vec![Cell::new("Unmatched"), count_cell(summary.unmatched, Color::Yellow)]);
    table.add_row(vec![Cell::new("Audited"), count_cell(summary.ambiguous, Color::Yellow)]);
    for field in MatchField::PRECEDENCE {
        let count = summary.by_field.get(&field).copied().unwrap_or(0);
        table.add_row(vec![
            dim_cell(format!("via {field}")),
            count_cell(count, Color::Blue),
        ]);
    }
    table.add_row(vec![
        Cell::new("Match rate")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{:.1}%", summary.match_ratio() * 100.0)).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Rows per assigned label, most frequent first.
pub fn label_table(result: &MatchRunResult) -> Table {
    let mut labels: Vec<(&String, &usize)> = result.summary.by_label.iter().collect();
    labels.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    let mut table = Table::new();
    table.set_header(vec![header_cell("Label"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (label, count) in labels {
        table.add_row(vec![
            Cell::new(label).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(count),
        ]);
    }
    table
}

/// Dictionary entries in effective rank order (priority, then list order).
pub fn patterns_table(patterns: &PatternSet) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Search term"),
        header_cell("Label"),
        header_cell("Priority"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for index in patterns.ranked_indices() {
        let Some(pattern) = patterns.get(index) else {
            continue;
        };
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(&pattern.search_term),
            Cell::new(pattern.replacement_label.to_uppercase()).fg(Color::Blue),
            Cell::new(pattern.priority),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
