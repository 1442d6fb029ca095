//! Chapter navigation and passage loading.

use std::sync::Arc;

use super::scripture::{ChapterText, Passage, TextProvider};
use crate::bible::ChapterPosition;
use crate::error::{FetchError, NavigationError};

/// Direction of a chapter step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Following chapter.
    Next,
    /// Preceding chapter.
    Previous,
}

/// Step the cursor one chapter within the same book.
///
/// Moving back from chapter 1 fails; moving forward is never bounded by the
/// book's chapter count, so a chapter past the end is left for the provider
/// to reject.
pub fn advance(
    position: &ChapterPosition,
    direction: Direction,
) -> Result<ChapterPosition, NavigationError> {
    let chapter = match direction {
        Direction::Previous => position
            .chapter
            .checked_sub(1)
            .filter(|&c| c >= 1)
            .ok_or(NavigationError::AtFirstChapter)?,
        Direction::Next => position
            .chapter
            .checked_add(1)
            .ok_or(NavigationError::ChapterOverflow)?,
    };
    Ok(ChapterPosition::new(position.book.clone(), chapter))
}

/// Loads passages through a [`TextProvider`] and segments the result.
#[derive(Clone)]
pub struct Navigator {
    provider: Arc<dyn TextProvider>,
}

impl Navigator {
    /// Create a navigator over a provider.
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    /// Fetch a chapter or reference and split it on verse markers.
    ///
    /// Provider failures are returned unchanged; nothing is retried.
    pub async fn load(&self, passage: impl Into<Passage>) -> Result<ChapterText, FetchError> {
        let passage = passage.into();
        let label = passage.label();
        tracing::debug!("Loading {label} via {}", self.provider.name());

        let result = match &passage {
            Passage::Chapter(position) => {
                self.provider.fetch_chapter(&position.book, position.chapter).await
            }
            Passage::Reference(reference) => match reference.verses() {
                Some(verses) => {
                    self.provider
                        .fetch_verses(reference.book(), reference.chapter(), verses)
                        .await
                }
                None => self.provider.fetch_chapter(reference.book(), reference.chapter()).await,
            },
        };

        match result {
            Ok(raw) => Ok(ChapterText::new(label, raw)),
            Err(e) => {
                tracing::warn!("Failed to load {label}: {e}");
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("provider", &self.provider.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::bible::{parse_reference, Catalogue, VerseSpan};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records calls and answers from a fixed script.
    #[derive(Default)]
    struct Recording {
        calls: Mutex<Vec<String>>,
        fail_with: Option<String>,
    }

    #[async_trait]
    impl TextProvider for Recording {
        async fn fetch_chapter(&self, book: &str, chapter: u32) -> Result<String, FetchError> {
            self.calls.lock().unwrap().push(format!("chapter {book} {chapter}"));
            match &self.fail_with {
                Some(msg) => Err(FetchError::new(msg.clone())),
                None => Ok("[1] Uno [2] Dos".to_string()),
            }
        }

        async fn fetch_verses(
            &self,
            book: &str,
            chapter: u32,
            verses: VerseSpan,
        ) -> Result<String, FetchError> {
            self.calls.lock().unwrap().push(format!("verses {book} {chapter}:{verses}"));
            Ok("[16] Porque de tal manera".to_string())
        }

        fn name(&self) -> &'static str {
            "Recording"
        }
    }

    #[test]
    fn previous_from_first_chapter_fails() {
        let pos = ChapterPosition::new("Genesis", 1);
        assert_eq!(advance(&pos, Direction::Previous), Err(NavigationError::AtFirstChapter));
    }

    #[test]
    fn next_from_first_chapter() {
        let pos = ChapterPosition::new("Genesis", 1);
        assert_eq!(advance(&pos, Direction::Next), Ok(ChapterPosition::new("Genesis", 2)));
    }

    #[test]
    fn previous_stays_in_book() {
        let pos = ChapterPosition::new("Exodo", 2);
        assert_eq!(advance(&pos, Direction::Previous), Ok(ChapterPosition::new("Exodo", 1)));
    }

    #[test]
    fn next_is_unbounded_by_chapter_count() {
        let pos = ChapterPosition::new("Abdias", 1);
        assert_eq!(advance(&pos, Direction::Next), Ok(ChapterPosition::new("Abdias", 2)));

        let max = ChapterPosition::new("Salmos", u32::MAX);
        assert_eq!(advance(&max, Direction::Next), Err(NavigationError::ChapterOverflow));
    }

    #[test]
    fn advance_does_not_mutate_input() {
        let pos = ChapterPosition::new("Juan", 3);
        let _ = advance(&pos, Direction::Next);
        assert_eq!(pos.chapter, 3);
    }

    #[tokio::test]
    async fn load_chapter_segments_text() {
        let provider = Arc::new(Recording::default());
        let navigator = Navigator::new(Arc::clone(&provider) as Arc<dyn TextProvider>);

        let text = navigator.load(ChapterPosition::new("Juan", 3)).await.unwrap();
        assert_eq!(text.reference, "Juan 3");
        assert_eq!(text.segments.iter().filter(|s| s.verse.is_some()).count(), 2);
        assert_eq!(*provider.calls.lock().unwrap(), vec!["chapter Juan 3"]);
    }

    #[tokio::test]
    async fn load_reference_with_verses_uses_verse_fetch() {
        let provider = Arc::new(Recording::default());
        let navigator = Navigator::new(Arc::clone(&provider) as Arc<dyn TextProvider>);
        let reference = parse_reference("Juan 3:16-18", &Catalogue::spanish()).unwrap();

        let text = navigator.load(reference).await.unwrap();
        assert_eq!(text.reference, "Juan 3:16-18");
        assert_eq!(*provider.calls.lock().unwrap(), vec!["verses Juan 3:16-18"]);
    }

    #[tokio::test]
    async fn load_reference_without_verses_fetches_chapter() {
        let provider = Arc::new(Recording::default());
        let navigator = Navigator::new(Arc::clone(&provider) as Arc<dyn TextProvider>);
        let reference = parse_reference("Juan 3", &Catalogue::spanish()).unwrap();

        navigator.load(reference).await.unwrap();
        assert_eq!(*provider.calls.lock().unwrap(), vec!["chapter Juan 3"]);
    }

    #[tokio::test]
    async fn fetch_error_passes_through() {
        let provider = Arc::new(Recording {
            fail_with: Some("capitulo no encontrado".to_string()),
            ..Recording::default()
        });
        let navigator = Navigator::new(provider);

        let err = navigator.load(ChapterPosition::new("Juan", 40)).await.unwrap_err();
        assert_eq!(err.message, "capitulo no encontrado");
    }
}
