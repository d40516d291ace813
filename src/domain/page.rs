//! Deterministic page slicing over classified bookmark lists.

/// Number of bookmarks per page on both views.
pub const PAGE_SIZE: usize = 20;

/// Returns the slice of `items` belonging to the 1-indexed `page`.
///
/// Page numbers below 1 are clamped to 1; pages past the end yield an
/// empty slice rather than an error.
#[must_use]
pub fn page_slice<T>(items: &[T], page: u32) -> &[T] {
    let page = page.max(1) as usize;
    let skip = (page - 1).saturating_mul(PAGE_SIZE);
    match items.get(skip..) {
        Some(rest) => rest.get(..PAGE_SIZE.min(rest.len())).unwrap_or(&[]),
        None => &[],
    }
}

/// Returns the number of pages needed to show `count` items.
#[must_use]
pub fn total_pages(count: usize) -> u32 {
    u32::try_from(count.div_ceil(PAGE_SIZE)).unwrap_or(u32::MAX)
}
