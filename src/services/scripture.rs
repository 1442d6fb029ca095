//! Scripture text provider abstraction.
//!
//! The reader never talks HTTP directly; it goes through [`TextProvider`],
//! which the real client in [`crate::provider`] and test fakes implement.

use async_trait::async_trait;

use crate::bible::{segment, verse_rows, ChapterPosition, Reference, VerseRow, VerseSegment, VerseSpan};
use crate::error::FetchError;

/// Trait for scripture text providers.
///
/// Returned text is expected to carry inline `[n]` verse markers; text
/// without markers is still displayed, as a single unnumbered block.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Fetch a whole chapter.
    async fn fetch_chapter(&self, book: &str, chapter: u32) -> Result<String, FetchError>;

    /// Fetch selected verses of a chapter.
    async fn fetch_verses(
        &self,
        book: &str,
        chapter: u32,
        verses: VerseSpan,
    ) -> Result<String, FetchError>;

    /// Get the name of this provider (for debugging/logging).
    fn name(&self) -> &'static str;
}

/// What to load: a bare chapter or a parsed reference (possibly with verses).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Passage {
    /// A whole chapter at the cursor.
    Chapter(ChapterPosition),
    /// A parsed reference; verses are fetched if present.
    Reference(Reference),
}

impl Passage {
    /// The chapter the passage lives in.
    pub fn position(&self) -> ChapterPosition {
        match self {
            Self::Chapter(position) => position.clone(),
            Self::Reference(reference) => reference.position(),
        }
    }

    /// Display label used as the [`ChapterText::reference`].
    pub fn label(&self) -> String {
        match self {
            Self::Chapter(position) => position.to_string(),
            Self::Reference(reference) => reference.to_string(),
        }
    }
}

impl From<ChapterPosition> for Passage {
    fn from(position: ChapterPosition) -> Self {
        Self::Chapter(position)
    }
}

impl From<Reference> for Passage {
    fn from(reference: Reference) -> Self {
        Self::Reference(reference)
    }
}

/// Fetched text ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterText {
    /// Formatted reference ("Juan 3", "Juan 3:16-18").
    pub reference: String,
    /// Text exactly as the provider returned it.
    pub raw_text: String,
    /// `raw_text` split on verse markers.
    pub segments: Vec<VerseSegment>,
}

impl ChapterText {
    /// Segment provider text under a reference label.
    pub fn new(reference: impl Into<String>, raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        let segments = segment(&raw_text);
        Self {
            reference: reference.into(),
            raw_text,
            segments,
        }
    }

    /// One row per verse for list-style display.
    pub fn rows(&self) -> Vec<VerseRow> {
        verse_rows(&self.segments)
    }
}
