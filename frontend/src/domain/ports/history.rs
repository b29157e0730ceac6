//! Port for the browser-history stack.

/// Session history the router pushes committed paths into.
#[cfg_attr(test, mockall::automock)]
pub trait History: Send + Sync {
    /// Append `path` and make it current.
    fn push(&self, path: &str);

    /// Path of the current entry.
    fn current_path(&self) -> String;
}
