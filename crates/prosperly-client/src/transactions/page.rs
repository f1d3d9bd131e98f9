use serde::Serialize;

pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total: usize,
}

/// Slices one page out of `rows`, clamping `page` into the valid range.
///
/// There is always at least one page, even when `rows` is empty.
pub fn paginate<T>(rows: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total = rows.len();
    let total_pages = total.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * page_size;

    let rows = rows.into_iter().skip(start).take(page_size).collect();

    Page {
        rows,
        page,
        page_size,
        total_pages,
        total,
    }
}
