//! Page-number pagination primitives for SportClub frontend views.
//!
//! Views receive fully loaded lists from the backend and paginate them in
//! memory. This crate keeps that arithmetic in one place:
//!
//! - [`paginate`] slices a list into the requested page, clamped to bounds.
//! - [`page_window`] computes which page buttons a pagination control shows,
//!   including the leading/trailing ellipses.
//!
//! # Example
//!
//! ```
//! use pagination::{PageSize, page_window, paginate};
//!
//! let items: Vec<u32> = (1..=12).collect();
//! let page = paginate(&items, 3, PageSize::default());
//! assert_eq!(page.items(), &[11, 12]);
//! assert_eq!(page.total_pages(), 3);
//!
//! let window = page_window(page.number(), page.total_pages()).expect("three pages");
//! assert_eq!(window.pages().collect::<Vec<_>>(), vec![1, 2, 3]);
//! ```

mod page;
mod window;

pub use page::{DEFAULT_PAGE_SIZE, Page, PageSize, PageSizeError, paginate, total_pages};
pub use window::{DEFAULT_MAX_VISIBLE, PageWindow, page_window, page_window_with};
