//! Per-creator commission rollup
//!
//! One pass over the record snapshot. Rows are created on first sight of a
//! key and kept in first-occurrence order; the final presentation order is
//! owned by the sort stage.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

use crate::numeric::{parse_numeric, resolve_total};

/// A flat key/value transaction record as delivered by the data source
pub type Record = Map<String, Value>;

/// Which two raw fields hold the estimated and actual amounts of a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    pub estimated_field: String,
    pub actual_field: String,
}

impl CategorySpec {
    pub fn new(
        name: impl Into<String>,
        estimated_field: impl Into<String>,
        actual_field: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            estimated_field: estimated_field.into(),
            actual_field: actual_field.into(),
        }
    }
}

/// Field layout of the records being rolled up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSpec {
    /// Grouping field (creator display name)
    pub key_field: String,
    /// Field summed into `AggregateRow::sum`
    pub volume_field: String,
    /// Ordered category definitions
    pub categories: Vec<CategorySpec>,
}

/// Accumulated amounts of one category for one key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub name: String,
    pub estimated: f64,
    pub actual: f64,
    pub total: f64,
}

/// One row of the rollup, unique per key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub key: String,
    pub count: usize,
    pub sum: f64,
    /// In the same order as `AggregateSpec::categories`
    pub categories: Vec<CategoryTotals>,
    pub grand_total: f64,
}

impl AggregateRow {
    fn empty(key: String, spec: &AggregateSpec) -> Self {
        Self {
            key,
            count: 0,
            sum: 0.0,
            categories: spec
                .categories
                .iter()
                .map(|c| CategoryTotals {
                    name: c.name.clone(),
                    ..Default::default()
                })
                .collect(),
            grand_total: 0.0,
        }
    }

    /// Look up a category by name
    pub fn category(&self, name: &str) -> Option<&CategoryTotals> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Total of the category at `index`, zero when out of range
    pub fn category_total(&self, index: usize) -> f64 {
        self.categories.get(index).map_or(0.0, |c| c.total)
    }

    /// Recompute `grand_total` from the category totals
    pub fn recompute_grand_total(&mut self) {
        self.grand_total = self.categories.iter().map(|c| c.total).sum();
    }

    fn fold(&mut self, record: &Record, spec: &AggregateSpec) {
        self.count += 1;
        self.sum += parse_numeric(record.get(&spec.volume_field));

        for (totals, category) in self.categories.iter_mut().zip(&spec.categories) {
            let estimated = parse_numeric(record.get(&category.estimated_field));
            let actual = parse_numeric(record.get(&category.actual_field));

            // Neither amount known yet: the record adds nothing to this category
            if estimated <= 0.0 && actual <= 0.0 {
                continue;
            }

            totals.estimated += estimated;
            totals.actual += actual;
            totals.total += resolve_total(estimated, actual);
        }
    }
}

/// Grouping key of a record. Missing or `null` keys group under "".
pub fn key_of(record: &Record, key_field: &str) -> String {
    match record.get(key_field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Roll up `records` into one row per distinct key.
///
/// Never fails: absent or malformed amounts count as zero.
pub fn aggregate(records: &[Record], spec: &AggregateSpec) -> Vec<AggregateRow> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<AggregateRow> = Vec::new();

    for record in records {
        let key = key_of(record, &spec.key_field);
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                rows.push(AggregateRow::empty(key.clone(), spec));
                index.insert(key, rows.len() - 1);
                rows.len() - 1
            }
        };
        rows[slot].fold(record, spec);
    }

    for row in &mut rows {
        row.recompute_grand_total();
    }

    debug!(
        records = records.len(),
        rows = rows.len(),
        categories = spec.categories.len(),
        "Aggregated records"
    );

    rows
}
