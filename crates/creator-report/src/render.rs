//! Console rendering (report table, pagination bar, summary)

use report_pipeline::{AggregateRow, PageItem, ReportPage, SortField};
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};

use crate::config::Config;
use crate::constants;
use crate::format::{format_compact, format_money, normalize_zero};

/// Fixed columns before the categories: #, key, orders, volume
const LEADING_COLUMNS: usize = 4;

/// Totals over every row matching the search (all pages)
#[derive(Debug, Default, PartialEq)]
pub struct ReportSummary {
    pub records: usize,
    pub creators: usize,
    pub matched: usize,
    pub volume: f64,
    pub category_totals: Vec<f64>,
    pub grand_total: f64,
}

impl ReportSummary {
    pub fn new(records: usize, creators: usize, matched_rows: &[AggregateRow], categories: usize) -> Self {
        let mut summary = Self {
            records,
            creators,
            matched: matched_rows.len(),
            category_totals: vec![0.0; categories],
            ..Default::default()
        };

        for row in matched_rows {
            summary.volume += row.sum;
            summary.grand_total += row.grand_total;
            for (total, category) in summary.category_totals.iter_mut().zip(&row.categories) {
                *total += category.total;
            }
        }

        summary
    }
}

/// Table column a sort field maps to
fn sorted_column(field: SortField, categories: usize) -> usize {
    match field {
        SortField::Key => 1,
        SortField::Count => 2,
        SortField::Sum => 3,
        SortField::Category(index) => LEADING_COLUMNS + index,
        SortField::GrandTotal => LEADING_COLUMNS + categories,
    }
}

fn header_row(config: &Config, page: &ReportPage) -> Vec<String> {
    let categories = config.spec.categories.len();
    let mut header = vec![
        "#".to_string(),
        config.key_label.clone(),
        "Orders".to_string(),
        "Volume".to_string(),
    ];
    header.extend((0..categories).map(|i| config.category_label(i).to_string()));
    header.push("Grand total".to_string());

    let sorted = sorted_column(page.sort_field, categories);
    if let Some(label) = header.get_mut(sorted) {
        label.push(' ');
        label.push_str(page.sort_direction.indicator());
    }

    header
}

/// Render the rows of one page as a table
pub fn render_table(config: &Config, page: &ReportPage) -> String {
    let mut builder = Builder::default();
    builder.push_record(header_row(config, page));

    let offset = (page.clamped_page - 1) * page.page_size;
    for (i, row) in page.rows.iter().enumerate() {
        let key = if row.key.is_empty() {
            constants::BLANK_KEY_LABEL.to_string()
        } else {
            row.key.clone()
        };

        let mut cells = vec![
            (offset + i + 1).to_string(),
            key,
            row.count.to_string(),
            format_compact(row.sum),
        ];
        cells.extend(row.categories.iter().map(|c| format_money(c.total)));
        cells.push(format_money(row.grand_total));
        builder.push_record(cells);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()));
    table.to_string()
}

/// Pagination control, e.g. `« 1 … 4 5 [6] 7 8 … 20 »`
pub fn render_page_bar(page: &ReportPage) -> String {
    if page.total_pages == 0 {
        return String::new();
    }

    let mut parts = vec!["«".to_string()];
    parts.extend(page.page_numbers.iter().map(|item| match item {
        PageItem::Page(n) if *n == page.clamped_page => format!("[{n}]"),
        PageItem::Page(n) => n.to_string(),
        PageItem::Ellipsis => "…".to_string(),
    }));
    parts.push("»".to_string());
    parts.join(" ")
}

/// Print one page of the report with its pagination bar
pub fn print_report(config: &Config, page: &ReportPage, search_term: &str) {
    println!("\n{}", config.title);

    if page.rows.is_empty() {
        if search_term.is_empty() {
            println!("\nNo records to report.");
        } else {
            println!("\nNo {} matches '{}'.", config.key_label.to_lowercase(), search_term);
        }
        return;
    }

    println!("{}", render_table(config, page));
    println!("  {}", render_page_bar(page));
    println!("  {}", page_footer(config, page));
}

/// "Page 2 of 5 (43 creators)"
pub fn page_footer(config: &Config, page: &ReportPage) -> String {
    let noun = config.key_label.to_lowercase();
    let plural = if page.total_rows == 1 { "" } else { "s" };
    format!(
        "Page {} of {} ({} {}{})",
        page.clamped_page, page.total_pages, page.total_rows, noun, plural
    )
}

/// Print summary to console
pub fn print_summary(config: &Config, summary: &ReportSummary, year_filter: Option<i32>) {
    println!("\n============================================================");
    if let Some(year) = year_filter {
        println!("                COMMISSION SUMMARY ({})", year);
    } else {
        println!("                    COMMISSION SUMMARY");
    }
    println!("============================================================\n");

    println!("DATA:");
    println!("  Records:            {:>14}", summary.records);
    println!("  {:<20}{:>14}", format!("{}s:", config.key_label), summary.creators);
    println!("  Matching search:    {:>14}", summary.matched);
    println!(
        "  Volume:             {:>14}",
        format_money(normalize_zero(summary.volume))
    );

    println!("\nCOMMISSIONS:");
    for (i, total) in summary.category_totals.iter().enumerate() {
        println!(
            "  {:<20}{:>14}",
            format!("{}:", config.category_label(i)),
            format_money(*total)
        );
    }
    println!("  ──────────────────────────────────");
    println!("  Grand Total:        {:>14}", format_money(summary.grand_total));

    println!("============================================================");
}

/// Print the configured categories
pub fn print_categories(config: &Config) {
    let mut builder = Builder::default();
    builder.push_record(["Name", "Label", "Estimated field", "Actual field"]);
    for (i, category) in config.spec.categories.iter().enumerate() {
        builder.push_record([
            category.name.as_str(),
            config.category_label(i),
            category.estimated_field.as_str(),
            category.actual_field.as_str(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());

    println!("{}", config.title);
    println!("{}", table);
    println!(
        "\nKey field: {}   Volume field: {}   Date field: {}",
        config.spec.key_field,
        config.spec.volume_field,
        config.date_field.as_deref().unwrap_or("-")
    );
}
