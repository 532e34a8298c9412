use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use rc128_navigator::{NavigationPhase, Selection, Toggle};

use crate::types::{ArticlesResult, CheckResult, LookupResult, TocResult};

pub fn print_toc(result: &TocResult) {
    println!("Source: {}", result.source.display());
    println!("Language: {}", result.language.display_name());
    print!("{}", result.rendered);
    for line in event_lines(result) {
        println!("{line}");
    }
}

/// One line per applied event, then the final phase.
pub fn event_lines(result: &TocResult) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some((id, selection)) = &result.selection {
        lines.push(match selection {
            Selection::Focused { chapter, part, .. } => {
                format!("select {id}: focused (chapter {chapter}, part {part})")
            }
            Selection::Deferred => format!("select {id}: deferred until the next data load"),
        });
    }
    for (id, toggle) in &result.toggles {
        let outcome = match toggle {
            Toggle::Expanded => "expanded",
            Toggle::Collapsed => "collapsed",
            Toggle::Ignored => "ignored (not a part or chapter)",
        };
        lines.push(format!("toggle {id}: {outcome}"));
    }
    let phase = match result.phase {
        NavigationPhase::Idle => "idle",
        NavigationPhase::Focused => "focused",
        NavigationPhase::Transitioning => "transitioning",
    };
    lines.push(format!("phase: {phase}"));
    lines
}

pub fn print_articles(result: &ArticlesResult) {
    println!("Source: {}", result.source.display());
    match &result.search {
        Some(term) => println!(
            "{} articles matching {term:?} ({})",
            result.rows.len(),
            result.language.display_name()
        ),
        None => println!(
            "{} articles ({})",
            result.rows.len(),
            result.language.display_name()
        ),
    }
    if !result.rows.is_empty() {
        println!("{}", articles_table(result));
    }
}

pub fn articles_table(result: &ArticlesResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Part"),
        header_cell("Chapter"),
        header_cell("Article"),
        header_cell("Title"),
        header_cell("Effective"),
    ]);
    apply_table_style(&mut table);
    for row in &result.rows {
        table.add_row(vec![
            dim_cell(&row.id),
            Cell::new(&row.part),
            Cell::new(&row.chapter),
            Cell::new(&row.article)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&row.title),
            match &row.effective_date {
                Some(date) => Cell::new(date),
                None => dim_cell("-"),
            },
        ]);
    }
    table
}

pub fn print_check(result: &CheckResult) {
    println!("Source: {}", result.source.display());
    println!("Records: {}", result.record_count);
    println!("{}", check_table(result));
    if let Some(table) = issue_table(result) {
        println!();
        println!("Row issues:");
        println!("{table}");
    }
    for report in &result.reports {
        for skipped in &report.skipped_malformed {
            eprintln!(
                "- [{}] {} skipped: missing {}",
                report.language,
                skipped.record_id,
                skipped.missing.join(", ")
            );
        }
        for duplicate in &report.duplicates {
            eprintln!(
                "- [{}] {} duplicates {}",
                report.language, duplicate.record_id, duplicate.kept
            );
        }
    }
}

pub fn check_table(result: &CheckResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Language"),
        header_cell("Records"),
        header_cell("Parts"),
        header_cell("Chapters"),
        header_cell("Articles"),
        header_cell("Duplicates"),
        header_cell("Skipped"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for report in &result.reports {
        table.add_row(vec![
            Cell::new(report.language.display_name())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(report.considered),
            Cell::new(report.parts),
            Cell::new(report.chapters),
            Cell::new(report.articles),
            count_cell(report.duplicate_count(), Color::Yellow),
            count_cell(report.skipped_count(), Color::Red),
        ]);
    }
    table
}

fn issue_table(result: &CheckResult) -> Option<Table> {
    if result.issues.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Record"),
        header_cell("Outcome"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for issue in &result.issues {
        let outcome = if issue.dropped() {
            Cell::new("DROPPED")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new("KEPT").fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(issue.row),
            Cell::new(&issue.record_id),
            outcome,
            Cell::new(issue.to_string()),
        ]);
    }
    Some(table)
}

pub fn print_lookup(result: &LookupResult) {
    println!("{}", lookup_table(result));
}

pub fn lookup_table(result: &LookupResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Title"),
        header_cell("Category"),
        header_cell("Article"),
        header_cell("Required fields"),
    ]);
    apply_table_style(&mut table);
    for entry in &result.entries {
        table.add_row(vec![
            Cell::new(entry.code)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(entry.title),
            Cell::new(entry.category),
            Cell::new(entry.statutory_article),
            Cell::new(entry.required_fields.join(", ")),
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
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
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
