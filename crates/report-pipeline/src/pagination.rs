//! Page slicing and the page-number index shown under report tables

use serde::{Deserialize, Serialize};

/// Pages shown on each side of the current page once the index is windowed
pub const PAGE_WINDOW_RADIUS: usize = 3;

/// Up to this many pages are listed without a window
const MAX_UNWINDOWED_PAGES: usize = 7;

/// One entry of the pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// A page window over a borrowed row list
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination<'a, T> {
    pub rows: &'a [T],
    pub page_numbers: Vec<PageItem>,
    pub clamped_page: usize,
    pub total_pages: usize,
}

/// Number of pages needed for `len` rows. A page size of 0 counts as 1.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Slice `rows` to the requested 1-based page, clamping the page into range.
pub fn paginate<T>(rows: &[T], page: usize, page_size: usize) -> Pagination<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(rows.len(), page_size);
    let clamped_page = page.clamp(1, total_pages.max(1));

    let start = ((clamped_page - 1) * page_size).min(rows.len());
    let end = (clamped_page * page_size).min(rows.len());

    Pagination {
        rows: &rows[start..end],
        page_numbers: page_numbers(clamped_page, total_pages),
        clamped_page,
        total_pages,
    }
}

/// Page index for the control: every page when there are few, otherwise a
/// window around `current` anchored by the first and last page. `current` is
/// clamped into `1..=total_pages` first.
pub fn page_numbers(current: usize, total_pages: usize) -> Vec<PageItem> {
    if total_pages <= MAX_UNWINDOWED_PAGES {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    let current = current.clamp(1, total_pages);
    let start = current.saturating_sub(PAGE_WINDOW_RADIUS).max(1);
    let end = current.saturating_add(PAGE_WINDOW_RADIUS).min(total_pages);
    let mut items = Vec::with_capacity(MAX_UNWINDOWED_PAGES + 4);

    if start > 1 {
        items.push(PageItem::Page(1));
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }

    items.extend((start..=end).map(PageItem::Page));

    if end < total_pages {
        if end < total_pages - 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total_pages));
    }

    items
}
