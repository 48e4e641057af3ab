//! CSV export of the filtered, sorted rollup (all pages)

use anyhow::{Context, Result};
use csv::Writer;
use report_pipeline::AggregateRow;
use std::io::Write;
use std::path::Path;

use crate::config::Config;

/// Write creator_commissions.csv
pub fn export_rows(path: &Path, config: &Config, rows: &[AggregateRow]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_rows(file, config, rows)?;
    println!("  Generated: {} ({} rows)", path.display(), rows.len());

    Ok(())
}

fn column_name(label: &str) -> String {
    label.trim().replace(' ', "_")
}

pub fn write_rows<W: Write>(writer: W, config: &Config, rows: &[AggregateRow]) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);

    // Header
    let mut header = vec![column_name(&config.key_label), "Count".to_string(), "Sum".to_string()];
    for i in 0..config.spec.categories.len() {
        let name = column_name(config.category_label(i));
        header.push(format!("{name}_Estimated"));
        header.push(format!("{name}_Actual"));
        header.push(format!("{name}_Total"));
    }
    header.push("Grand_Total".to_string());
    wtr.write_record(&header)?;

    for row in rows {
        let mut record = vec![row.key.clone(), row.count.to_string(), format!("{:.2}", row.sum)];
        for category in &row.categories {
            record.push(format!("{:.2}", category.estimated));
            record.push(format!("{:.2}", category.actual));
            record.push(format!("{:.2}", category.total));
        }
        record.push(format!("{:.2}", row.grand_total));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
