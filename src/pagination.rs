use serde::Serialize;

/// Page size used by list endpoints when the caller does not choose one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Page numbers to render, `None` marking an elided gap.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One page of a list response.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub pages: Vec<Option<usize>>,
}

impl<T> Paginated<T> {
    /// Wraps `items` found on `page` out of `total` matching rows.
    pub fn new(items: Vec<T>, total: usize, page: usize, per_page: usize) -> Self {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let total_pages = total.div_ceil(per_page);

        Self {
            pages: get_pages(total_pages, page, 2, 2, 4, 2),
            items,
            total,
            page,
            per_page,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
            pages: self.pages,
        }
    }
}
