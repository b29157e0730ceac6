//! Visible page-button window for pagination controls.

use std::ops::RangeInclusive;

/// Maximum number of consecutive page buttons rendered by default.
pub const DEFAULT_MAX_VISIBLE: usize = 5;

/// Page buttons a pagination control renders around the current page.
///
/// ## Invariants
/// - `1 <= first_visible <= last_visible <= total_pages`.
/// - `total_pages > 1`; single-page lists have no window at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    current: usize,
    total_pages: usize,
    first_visible: usize,
    last_visible: usize,
}

impl PageWindow {
    /// Current page number.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Total number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Consecutive page numbers rendered as buttons.
    #[must_use]
    pub const fn pages(&self) -> RangeInclusive<usize> {
        self.first_visible..=self.last_visible
    }

    /// Whether a dedicated button for page 1 precedes the window.
    #[must_use]
    pub const fn shows_first(&self) -> bool {
        self.first_visible > 1
    }

    /// Whether an ellipsis separates page 1 from the window.
    #[must_use]
    pub const fn leading_gap(&self) -> bool {
        self.first_visible > 2
    }

    /// Whether a dedicated button for the last page follows the window.
    #[must_use]
    pub const fn shows_last(&self) -> bool {
        self.last_visible < self.total_pages
    }

    /// Whether an ellipsis separates the window from the last page.
    #[must_use]
    pub const fn trailing_gap(&self) -> bool {
        self.last_visible + 1 < self.total_pages
    }

    /// Whether the "previous" button is enabled.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current != 1
    }

    /// Whether the "next" button is enabled.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current != self.total_pages
    }
}

/// Compute the page window using [`DEFAULT_MAX_VISIBLE`] buttons.
///
/// Returns `None` when `total_pages <= 1`, meaning no control is rendered.
#[must_use]
pub fn page_window(current: usize, total_pages: usize) -> Option<PageWindow> {
    page_window_with(current, total_pages, DEFAULT_MAX_VISIBLE)
}

/// Compute the page window showing at most `max_visible` consecutive buttons.
///
/// The window is centred on `current` where possible and shifted left when it
/// would run past the last page.
///
/// # Examples
/// ```
/// use pagination::page_window_with;
///
/// let window = page_window_with(6, 10, 5).expect("ten pages");
/// assert_eq!(window.pages(), 4..=8);
/// assert!(window.leading_gap());
/// assert!(window.trailing_gap());
/// ```
#[must_use]
pub fn page_window_with(
    current: usize,
    total_pages: usize,
    max_visible: usize,
) -> Option<PageWindow> {
    if total_pages <= 1 {
        return None;
    }
    let span = max_visible.max(1) - 1;
    let mut first_visible = current.saturating_sub(max_visible.div_euclid(2)).max(1);
    let last_visible = first_visible.saturating_add(span).min(total_pages);
    if last_visible - first_visible < span {
        first_visible = last_visible.saturating_sub(span).max(1);
    }
    Some(PageWindow {
        current,
        total_pages,
        first_visible,
        last_visible,
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the visible page window.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 0)]
    #[case(1, 1)]
    fn single_page_has_no_window(#[case] current: usize, #[case] total: usize) {
        assert!(page_window(current, total).is_none());
    }

    #[rstest]
    #[case::start(1, 10, 1, 5)]
    #[case::centred(6, 10, 4, 8)]
    #[case::end(10, 10, 6, 10)]
    #[case::fewer_than_max(2, 3, 1, 3)]
    fn centres_window_on_current(
        #[case] current: usize,
        #[case] total: usize,
        #[case] first: usize,
        #[case] last: usize,
    ) {
        let window = page_window(current, total).expect("multi-page list");
        assert_eq!(window.pages(), first..=last);
    }

    #[rstest]
    fn first_page_disables_previous() {
        let window = page_window(1, 4).expect("multi-page list");
        assert!(!window.has_previous());
        assert!(window.has_next());
        assert!(!window.shows_first());
        assert!(!window.shows_last());
    }

    #[rstest]
    fn gaps_only_appear_when_pages_are_skipped() {
        let window = page_window(4, 10).expect("multi-page list");
        assert_eq!(window.pages(), 2..=6);
        assert!(window.shows_first());
        assert!(!window.leading_gap());
        assert!(window.shows_last());
        assert!(window.trailing_gap());
    }
}
