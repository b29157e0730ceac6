//! Slicing an in-memory list into numbered pages.

use std::num::NonZeroUsize;

use thiserror::Error;

/// Page size used by admin tables when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Errors raised when constructing a [`PageSize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageSizeError {
    /// Page size was zero.
    #[error("page size must be greater than zero")]
    Zero,
}

/// Number of items shown per page.
///
/// ## Invariants
/// - Always greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Validate and construct a page size.
    ///
    /// # Errors
    ///
    /// Returns [`PageSizeError::Zero`] when `size` is zero.
    pub fn new(size: usize) -> Result<Self, PageSizeError> {
        NonZeroUsize::new(size)
            .map(Self)
            .ok_or(PageSizeError::Zero)
    }

    /// Raw page size.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        match NonZeroUsize::new(DEFAULT_PAGE_SIZE) {
            Some(size) => Self(size),
            None => Self(NonZeroUsize::MIN),
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = PageSizeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Number of pages needed to show `total_items`; zero for an empty list.
#[must_use]
pub const fn total_pages(total_items: usize, size: PageSize) -> usize {
    total_items.div_ceil(size.get())
}

/// One page of a borrowed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    items: &'a [T],
    number: usize,
    total_pages: usize,
    total_items: usize,
}

impl<'a, T> Page<'a, T> {
    /// Items visible on this page.
    #[must_use]
    pub const fn items(&self) -> &'a [T] {
        self.items
    }

    /// One-based page number that was requested.
    #[must_use]
    pub const fn number(&self) -> usize {
        self.number
    }

    /// Total number of pages for the underlying list.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Length of the underlying list.
    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    /// Whether the page holds no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether a pagination control should be shown at all.
    #[must_use]
    pub const fn has_controls(&self) -> bool {
        self.total_pages > 1
    }
}

/// Slice `items` to page `number` (one-based).
///
/// The visible range is `[(number - 1) * size, number * size)` clamped to the
/// list bounds. Page `0` is treated as page `1`.
///
/// # Examples
/// ```
/// use pagination::{PageSize, paginate};
///
/// let size = PageSize::new(5).expect("non-zero");
/// let empty: [u8; 0] = [];
/// let page = paginate(&empty, 1, size);
/// assert!(page.is_empty());
/// assert!(!page.has_controls());
/// ```
#[must_use]
pub fn paginate<T>(items: &[T], number: usize, size: PageSize) -> Page<'_, T> {
    let number = number.max(1);
    let start = (number - 1).saturating_mul(size.get()).min(items.len());
    let end = start.saturating_add(size.get()).min(items.len());
    Page {
        items: items.get(start..end).unwrap_or(&[]),
        number,
        total_pages: total_pages(items.len(), size),
        total_items: items.len(),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for page slicing.
    use super::*;
    use rstest::rstest;

    fn size(value: usize) -> PageSize {
        PageSize::new(value).expect("test page sizes are non-zero")
    }

    #[rstest]
    fn rejects_zero_page_size() {
        assert_eq!(PageSize::new(0), Err(PageSizeError::Zero));
    }

    #[rstest]
    fn default_page_size_is_five() {
        assert_eq!(PageSize::default().get(), DEFAULT_PAGE_SIZE);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(5, 1)]
    #[case(6, 2)]
    #[case(11, 3)]
    fn counts_pages(#[case] items: usize, #[case] expected: usize) {
        assert_eq!(total_pages(items, size(5)), expected);
    }

    #[rstest]
    #[case::first(1, vec![0, 1, 2, 3, 4])]
    #[case::middle(2, vec![5, 6, 7, 8, 9])]
    #[case::last_partial(3, vec![10, 11])]
    #[case::past_end(4, vec![])]
    #[case::zero_is_first(0, vec![0, 1, 2, 3, 4])]
    fn slices_requested_page(#[case] number: usize, #[case] expected: Vec<u32>) {
        let items: Vec<u32> = (0..12).collect();
        let page = paginate(&items, number, size(5));
        assert_eq!(page.items(), expected.as_slice());
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.total_items(), 12);
    }

    #[rstest]
    fn single_page_hides_controls() {
        let items = [1, 2, 3];
        let page = paginate(&items, 1, size(5));
        assert_eq!(page.items(), &[1, 2, 3]);
        assert!(!page.has_controls());
    }
}
