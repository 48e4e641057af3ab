//! Creator commission report pipeline
//!
//! Folds a snapshot of flat transaction records into one row per creator,
//! then exposes the rows through independent search, sort and page-window
//! stages. Every stage is a pure function over in-memory slices.

mod aggregate;
mod error;
mod numeric;
mod pagination;
mod query;
mod view;

pub use aggregate::{AggregateRow, AggregateSpec, CategorySpec, CategoryTotals, Record, aggregate, key_of};
pub use error::PipelineError;
pub use numeric::{parse_numeric, parse_numeric_str, resolve_total};
pub use pagination::{PAGE_WINDOW_RADIUS, PageItem, Pagination, paginate, page_numbers, total_pages};
pub use query::{SortDirection, SortField, compare_keys, filter_by_search, sort_rows};
pub use view::{ReportPage, ViewState};
