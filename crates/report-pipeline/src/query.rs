//! Search and sort stages over aggregated rows

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use unicode_normalization::UnicodeNormalization as _;
use unicode_normalization::char::is_combining_mark;

use crate::aggregate::{AggregateRow, CategorySpec};
use crate::error::PipelineError;

/// Column a report can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Key,
    Count,
    Sum,
    /// Total of the category at this position in the category spec
    Category(usize),
    GrandTotal,
}

impl SortField {
    /// Resolve a column name typed by a user.
    ///
    /// Accepts `key`, `count`, `sum`, `grand_total` (dashes allowed) and the
    /// configured category names.
    pub fn parse(name: &str, categories: &[CategorySpec]) -> Result<Self, PipelineError> {
        if let Some(index) = categories.iter().position(|c| c.name == name) {
            return Ok(SortField::Category(index));
        }

        let normalized = name.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "key" => Ok(SortField::Key),
            "count" => Ok(SortField::Count),
            "sum" => Ok(SortField::Sum),
            "grand_total" | "total" => Ok(SortField::GrandTotal),
            _ => categories
                .iter()
                .position(|c| c.name.to_lowercase().replace('-', "_") == normalized)
                .map(SortField::Category)
                .ok_or_else(|| PipelineError::UnknownSortField {
                    field: name.to_string(),
                    expected: Self::names(categories).join(", "),
                }),
        }
    }

    /// Every name `parse` accepts for these categories
    pub fn names(categories: &[CategorySpec]) -> Vec<String> {
        let mut names: Vec<String> = ["key", "count", "sum"].iter().map(|s| s.to_string()).collect();
        names.extend(categories.iter().map(|c| c.name.clone()));
        names.push("grand_total".to_string());
        names
    }

    /// Direction applied when a column is first selected: names read A→Z,
    /// amounts largest first.
    pub fn default_direction(&self) -> SortDirection {
        match self {
            SortField::Key => SortDirection::Ascending,
            _ => SortDirection::Descending,
        }
    }

    fn numeric_value(&self, row: &AggregateRow) -> f64 {
        match self {
            SortField::Key => 0.0,
            SortField::Count => row.count as f64,
            SortField::Sum => row.sum,
            SortField::Category(index) => row.category_total(*index),
            SortField::GrandTotal => row.grand_total,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header arrow
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "ascending"),
            SortDirection::Descending => write!(f, "descending"),
        }
    }
}

/// Keep the rows whose key contains `term`, ignoring case.
///
/// An empty term keeps everything. Order is preserved.
pub fn filter_by_search(rows: &[AggregateRow], term: &str) -> Vec<AggregateRow> {
    if term.is_empty() {
        return rows.to_vec();
    }

    let needle = term.to_lowercase();
    rows.iter()
        .filter(|row| row.key.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Letters a key collates on: canonical decomposition with the marks
/// dropped, `đ` read as `d`, case folded
fn base_letters(key: &str) -> impl Iterator<Item = char> {
    key.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'đ' | 'Đ' => 'd',
            _ => c,
        })
        .flat_map(char::to_lowercase)
}

/// Locale-style key ordering.
///
/// Base letters decide first, so `Ánh` files next to `Anh` whatever its
/// Unicode form. Accents break ties on the base letters, then case
/// (lowercase first), and the raw string last.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| {
            a.nfd()
                .flat_map(char::to_lowercase)
                .cmp(b.nfd().flat_map(char::to_lowercase))
        })
        .then_with(|| b.nfd().cmp(a.nfd()))
        .then_with(|| b.cmp(a))
}

/// Stable in-place sort. Equal values keep their relative order in both
/// directions.
pub fn sort_rows(rows: &mut [AggregateRow], field: SortField, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let cmp = match field {
            SortField::Key => compare_keys(&a.key, &b.key),
            SortField::Count => a.count.cmp(&b.count),
            _ => field
                .numeric_value(a)
                .partial_cmp(&field.numeric_value(b))
                .unwrap_or(Ordering::Equal),
        };
        match direction {
            SortDirection::Ascending => cmp,
            SortDirection::Descending => cmp.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::CategoryTotals;

    fn row(key: &str, count: usize, sum: f64, totals: &[f64]) -> AggregateRow {
        let categories: Vec<CategoryTotals> = totals
            .iter()
            .enumerate()
            .map(|(i, t)| CategoryTotals {
                name: format!("cat{}", i + 1),
                estimated: *t,
                actual: 0.0,
                total: *t,
            })
            .collect();
        AggregateRow {
            key: key.to_string(),
            count,
            sum,
            grand_total: totals.iter().sum(),
            categories,
        }
    }

    fn keys(rows: &[AggregateRow]) -> Vec<&str> {
        rows.iter().map(|r| r.key.as_str()).collect()
    }

    fn categories() -> Vec<CategorySpec> {
        vec![
            CategorySpec::new("standard", "est_standard", "act_standard"),
            CategorySpec::new("ads-bonus", "est_ads", "act_ads"),
        ]
    }

    #[test]
    fn test_filter_case_insensitive_on_key() {
        let rows = vec![
            row("Linh Tran", 1, 0.0, &[]),
            row("Bao", 1, 0.0, &[]),
            row("LINHDA", 1, 0.0, &[]),
        ];
        assert_eq!(keys(&filter_by_search(&rows, "linh")), vec!["Linh Tran", "LINHDA"]);
        assert!(filter_by_search(&rows, "zzz").is_empty());
    }

    #[test]
    fn test_filter_empty_term_is_identity() {
        let rows = vec![row("b", 1, 0.0, &[]), row("a", 2, 0.0, &[])];
        assert_eq!(filter_by_search(&rows, ""), rows);
    }

    #[test]
    fn test_sort_by_key_ignores_case() {
        let mut rows = vec![
            row("charlie", 1, 0.0, &[]),
            row("Alice", 1, 0.0, &[]),
            row("bob", 1, 0.0, &[]),
        ];
        sort_rows(&mut rows, SortField::Key, SortDirection::Ascending);
        assert_eq!(keys(&rows), vec!["Alice", "bob", "charlie"]);

        sort_rows(&mut rows, SortField::Key, SortDirection::Descending);
        assert_eq!(keys(&rows), vec!["charlie", "bob", "Alice"]);
    }

    #[test]
    fn test_sort_by_key_ignores_accents_and_unicode_form() {
        let mut rows = vec![
            row("Zoe", 1, 0.0, &[]),
            row("Ánh Nguyen", 1, 0.0, &[]),
            row("Bao", 1, 0.0, &[]),
            row("A\u{301}nh Le", 1, 0.0, &[]),
        ];
        sort_rows(&mut rows, SortField::Key, SortDirection::Ascending);
        assert_eq!(keys(&rows), vec!["A\u{301}nh Le", "Ánh Nguyen", "Bao", "Zoe"]);
    }

    #[test]
    fn test_sort_by_key_reads_d_stroke_as_d() {
        let mut rows = vec![
            row("Em", 1, 0.0, &[]),
            row("Dung", 1, 0.0, &[]),
            row("Đức", 1, 0.0, &[]),
            row("Cuong", 1, 0.0, &[]),
        ];
        sort_rows(&mut rows, SortField::Key, SortDirection::Ascending);
        assert_eq!(keys(&rows), vec!["Cuong", "Đức", "Dung", "Em"]);
    }

    #[test]
    fn test_compare_keys_accent_breaks_base_tie() {
        assert_eq!(compare_keys("Anh", "Ánh"), Ordering::Less);
        assert_eq!(compare_keys("Ánh", "Anh"), Ordering::Greater);
        assert_eq!(compare_keys("Ánh Le", "Anh Nguyen"), Ordering::Less);
    }

    #[test]
    fn test_compare_keys_lowercase_first_on_case_tie() {
        assert_eq!(compare_keys("a", "A"), Ordering::Less);
        assert_eq!(compare_keys("Zed", "abe"), Ordering::Greater);
        assert_eq!(compare_keys("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_sort_numeric_fields() {
        let mut rows = vec![
            row("A", 3, 10.0, &[1.0, 9.0]),
            row("B", 1, 30.0, &[5.0, 0.0]),
            row("C", 2, 20.0, &[3.0, 1.0]),
        ];

        sort_rows(&mut rows, SortField::Count, SortDirection::Descending);
        assert_eq!(keys(&rows), vec!["A", "C", "B"]);

        sort_rows(&mut rows, SortField::Sum, SortDirection::Ascending);
        assert_eq!(keys(&rows), vec!["A", "C", "B"]);

        sort_rows(&mut rows, SortField::Category(0), SortDirection::Descending);
        assert_eq!(keys(&rows), vec!["B", "C", "A"]);

        sort_rows(&mut rows, SortField::GrandTotal, SortDirection::Descending);
        assert_eq!(keys(&rows), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut rows = vec![
            row("first", 1, 5.0, &[]),
            row("second", 1, 5.0, &[]),
            row("third", 1, 1.0, &[]),
        ];

        sort_rows(&mut rows, SortField::Sum, SortDirection::Descending);
        assert_eq!(keys(&rows), vec!["first", "second", "third"]);

        sort_rows(&mut rows, SortField::Sum, SortDirection::Ascending);
        assert_eq!(keys(&rows), vec!["third", "first", "second"]);
    }

    #[test]
    fn test_sort_unknown_category_index_sorts_as_zero() {
        let mut rows = vec![row("A", 1, 0.0, &[2.0]), row("B", 1, 0.0, &[1.0])];
        sort_rows(&mut rows, SortField::Category(5), SortDirection::Descending);
        assert_eq!(keys(&rows), vec!["A", "B"]);
    }

    #[test]
    fn test_sort_field_parse() {
        let cats = categories();
        assert_eq!(SortField::parse("key", &cats), Ok(SortField::Key));
        assert_eq!(SortField::parse("Count", &cats), Ok(SortField::Count));
        assert_eq!(SortField::parse("grand-total", &cats), Ok(SortField::GrandTotal));
        assert_eq!(SortField::parse("standard", &cats), Ok(SortField::Category(0)));
        assert_eq!(SortField::parse("ads_bonus", &cats), Ok(SortField::Category(1)));
        assert!(matches!(
            SortField::parse("profit", &cats),
            Err(PipelineError::UnknownSortField { .. })
        ));
    }

    #[test]
    fn test_default_direction() {
        assert_eq!(SortField::Key.default_direction(), SortDirection::Ascending);
        assert_eq!(SortField::Sum.default_direction(), SortDirection::Descending);
        assert_eq!(SortDirection::Ascending.toggled(), SortDirection::Descending);
    }
}
