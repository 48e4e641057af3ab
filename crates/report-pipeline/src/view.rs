//! Caller-held view settings and the page they select

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::AggregateRow;
use crate::pagination::{PageItem, paginate};
use crate::query::{SortDirection, SortField, filter_by_search, sort_rows};

/// Search, sort and page settings for one report view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub search_term: String,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    /// 1-based; clamped into range when applied
    pub current_page: usize,
    /// Fixed per view, at least 1
    pub page_size: usize,
}

impl ViewState {
    /// Largest grand totals first, page 1
    pub fn new(page_size: usize) -> Self {
        Self {
            search_term: String::new(),
            sort_field: SortField::GrandTotal,
            sort_direction: SortDirection::Descending,
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Header click: the active column flips direction, a new column starts
    /// in its default direction. Either way the view returns to page 1.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_field = field;
            self.sort_direction = field.default_direction();
        }
        self.current_page = 1;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Filter and sort `rows` without paging
    pub fn select(&self, rows: &[AggregateRow]) -> Vec<AggregateRow> {
        let mut selected = filter_by_search(rows, &self.search_term);
        sort_rows(&mut selected, self.sort_field, self.sort_direction);
        selected
    }

    /// Run search → sort → page over a fresh rollup
    pub fn apply(&self, rows: &[AggregateRow]) -> ReportPage {
        let selected = self.select(rows);
        let page = paginate(&selected, self.current_page, self.page_size);

        debug!(
            rows = rows.len(),
            matched = selected.len(),
            page = page.clamped_page,
            total_pages = page.total_pages,
            "Applied view state"
        );

        ReportPage {
            rows: page.rows.to_vec(),
            page_numbers: page.page_numbers,
            clamped_page: page.clamped_page,
            total_pages: page.total_pages,
            total_rows: selected.len(),
            page_size: self.page_size.max(1),
            sort_field: self.sort_field,
            sort_direction: self.sort_direction,
        }
    }
}

/// Everything a renderer needs for one page of the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPage {
    pub rows: Vec<AggregateRow>,
    pub page_numbers: Vec<PageItem>,
    pub clamped_page: usize,
    pub total_pages: usize,
    /// Rows matching the search, across all pages
    pub total_rows: usize,
    pub page_size: usize,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
}
