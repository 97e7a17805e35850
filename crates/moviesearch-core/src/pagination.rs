//! Page strip model.
//!
//! Turns a page count and the selected page into a compact strip of page
//! indicators. All indices are zero-based; the controller adds one.

/// Default number of pages shown around the selected page.
pub const DEFAULT_PAGE_RANGE: usize = 5;

/// Default number of pages always shown at each end.
pub const DEFAULT_MARGIN_PAGES: usize = 1;

/// Strip layout settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct PaginationConfig {
    /// Pages shown in the window around the selected page.
    pub page_range: usize,
    /// Pages always shown at the start and at the end.
    pub margin_pages: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_range: DEFAULT_PAGE_RANGE,
            margin_pages: DEFAULT_MARGIN_PAGES,
        }
    }
}

/// One slot of the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// Zero-based page index.
    Page(usize),
    /// Gap of two or more hidden pages.
    Break,
}

/// Rendered state of the pagination control.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct PaginationView {
    /// Total number of pages (always greater than 1).
    pub page_count: usize,
    /// Zero-based selected page.
    pub selected: usize,
    /// Strip contents.
    pub items: Vec<PageItem>,
}

impl PaginationView {
    /// Builds the view, or `None` when there is at most one page.
    #[must_use]
    pub fn build(page_count: usize, selected: usize, config: PaginationConfig) -> Option<Self> {
        if page_count <= 1 {
            return None;
        }
        let selected = selected.min(page_count.saturating_sub(1));
        Some(Self {
            page_count,
            selected,
            items: page_items(page_count, selected, config),
        })
    }

    /// Index of the previous page, if any.
    #[must_use]
    pub const fn previous(&self) -> Option<usize> {
        self.selected.checked_sub(1)
    }

    /// Index of the next page, if any.
    #[must_use]
    pub fn next(&self) -> Option<usize> {
        self.selected
            .checked_add(1)
            .filter(|&next| next < self.page_count)
    }
}

/// Builds the strip for `page_count` pages with `selected` highlighted.
///
/// The first and last `margin_pages` pages are always present, as is a
/// window of `page_range` pages containing `selected`. Hidden runs become
/// a single `Break`, except a run of exactly one page which is shown.
#[must_use]
pub fn page_items(page_count: usize, selected: usize, config: PaginationConfig) -> Vec<PageItem> {
    let margin = config.margin_pages;
    let range = config.page_range.max(1);

    if page_count <= range.saturating_add(margin.saturating_mul(2)) {
        return (0..page_count).map(PageItem::Page).collect();
    }

    let last = page_count.saturating_sub(1);
    let selected = selected.min(last);
    let mut window_start = selected.saturating_sub(range / 2);
    let mut window_end = window_start.saturating_add(range.saturating_sub(1));
    if window_end > last {
        window_end = last;
        window_start = last.saturating_sub(range.saturating_sub(1));
    }

    let shown = |index: usize| {
        index < margin
            || index >= page_count.saturating_sub(margin)
            || (window_start..=window_end).contains(&index)
    };

    let capacity = range
        .saturating_add(margin.saturating_mul(2))
        .saturating_add(2);
    let mut items = Vec::with_capacity(capacity);
    for index in 0..page_count {
        let lone_gap = index > 0
            && index < last
            && shown(index.saturating_sub(1))
            && shown(index.saturating_add(1));
        if shown(index) || lone_gap {
            items.push(PageItem::Page(index));
        } else if items.last() != Some(&PageItem::Break) {
            items.push(PageItem::Break);
        }
    }
    items
}
