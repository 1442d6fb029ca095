//! Service modules for passage loading.
//!
//! These sit between the pure parsing code in [`crate::bible`] and the
//! terminal reader, so they can be exercised without a terminal.

pub mod navigator;
pub mod scripture;

pub use navigator::{advance, Direction, Navigator};
pub use scripture::{ChapterText, Passage, TextProvider};
