//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Text provider defaults.
pub mod provider {
    /// Translation requested when none is configured.
    pub const DEFAULT_TRANSLATION: &str = "RVR1960";

    /// Default HTTP timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
}

/// Reader behaviour constants.
pub mod reader {
    /// Reference opened at start-up when none is configured.
    pub const DEFAULT_START_REFERENCE: &str = "Juan 1";

    /// Lines scrolled per key press.
    pub const SCROLL_STEP: u16 = 1;

    /// Lines scrolled per page key press.
    pub const PAGE_STEP: u16 = 10;
}

/// Book picker constants.
pub mod book_list {
    /// Minimum fuzzy score for a book to stay in the filtered list.
    pub const MIN_FUZZY_SCORE: i64 = 1;

    /// Column width reserved for book names.
    pub const NAME_COLUMN_WIDTH: usize = 18;
}

/// Async task constants.
pub mod async_tasks {
    /// Channel buffer size for async task communication.
    pub const CHANNEL_BUFFER_SIZE: usize = 16;
}
