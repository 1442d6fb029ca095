//! Free-text reference parsing ("Juan 3:16", "1 Cronicas 20:1-5").

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::catalogue::{Book, Catalogue};
use super::normalize;
use crate::error::ParseError;

/// Book phrase grammar: optional ordinal, then one or more letter-only words.
const BOOK_PHRASE: &str = r"(?:[123] )?\p{L}+(?: \p{L}+)*";

/// Matches normalized input: book phrase, chapter, optional verses.
#[allow(clippy::expect_used)]
static RE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^({BOOK_PHRASE}) ([0-9]+)(?::([0-9]+)(?:-([0-9]+))?)?$"))
        .expect("valid regex: RE_REFERENCE")
});

#[allow(clippy::expect_used)]
static RE_BOOK_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{BOOK_PHRASE}$")).expect("valid regex: RE_BOOK_PHRASE")
});

/// Whether a normalized book name can be written in a reference at all.
pub(crate) fn is_addressable(normalized_name: &str) -> bool {
    RE_BOOK_PHRASE.is_match(normalized_name)
}

/// Verses selected within a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerseSpan {
    /// One verse.
    Single(u32),
    /// An inclusive range, `start <= end`.
    Range {
        /// First verse.
        start: u32,
        /// Last verse.
        end: u32,
    },
}

impl VerseSpan {
    /// First verse of the span.
    pub const fn start(self) -> u32 {
        match self {
            Self::Single(v) => v,
            Self::Range { start, .. } => start,
        }
    }

    /// Last verse of the span.
    pub const fn end(self) -> u32 {
        match self {
            Self::Single(v) => v,
            Self::Range { end, .. } => end,
        }
    }
}

impl fmt::Display for VerseSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(v) => write!(f, "{v}"),
            Self::Range { start, end } => write!(f, "{start}-{end}"),
        }
    }
}

/// A resolved book/chapter/optional-verses triple.
///
/// Only [`parse_reference`] builds one, so `chapter >= 1` and any range is ordered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    book: String,
    chapter: u32,
    verses: Option<VerseSpan>,
}

impl Reference {
    /// Canonical book name.
    pub fn book(&self) -> &str {
        &self.book
    }

    /// Chapter number, at least 1.
    pub const fn chapter(&self) -> u32 {
        self.chapter
    }

    /// Selected verses, if any.
    pub const fn verses(&self) -> Option<VerseSpan> {
        self.verses
    }

    /// The chapter this reference lives in.
    pub fn position(&self) -> ChapterPosition {
        ChapterPosition::new(self.book.clone(), self.chapter)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.book, self.chapter)?;
        if let Some(verses) = self.verses {
            write!(f, ":{verses}")?;
        }
        Ok(())
    }
}

/// The navigation cursor: a book and a chapter within it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChapterPosition {
    /// Canonical book name.
    pub book: String,
    /// Chapter number.
    pub chapter: u32,
}

impl ChapterPosition {
    /// Create a position.
    pub fn new(book: impl Into<String>, chapter: u32) -> Self {
        Self { book: book.into(), chapter }
    }

    /// Chapter 1 of a catalogue book, used when a book is picked from the list.
    pub fn start_of(book: &Book) -> Self {
        Self::new(book.name.clone(), 1)
    }
}

impl From<&Reference> for ChapterPosition {
    fn from(reference: &Reference) -> Self {
        reference.position()
    }
}

impl fmt::Display for ChapterPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.book, self.chapter)
    }
}

/// Parse free text such as `"1 Crónicas 20:1-5"` against a catalogue.
///
/// Accents, case and surrounding whitespace are ignored. Chapter counts are
/// not checked; the text provider rejects chapters that do not exist.
pub fn parse_reference(input: &str, catalogue: &Catalogue) -> Result<Reference, ParseError> {
    let normalized = normalize(input);
    let caps = RE_REFERENCE
        .captures(&normalized)
        .ok_or(ParseError::UnrecognizedFormat)?;

    let phrase = caps.get(1).map_or("", |m| m.as_str());
    let book = catalogue
        .find(phrase)
        .ok_or_else(|| ParseError::BookNotFound(phrase.to_string()))?;

    let chapter = number(caps.get(2).map(|m| m.as_str()))?;
    if chapter == 0 {
        return Err(ParseError::ChapterOutOfRange);
    }

    let verses = match (caps.get(3), caps.get(4)) {
        (None, _) => None,
        (Some(start), None) => Some(VerseSpan::Single(verse(start.as_str())?)),
        (Some(start), Some(end)) => {
            let start = verse(start.as_str())?;
            let end = verse(end.as_str())?;
            if start > end {
                return Err(ParseError::InvertedRange { start, end });
            }
            Some(VerseSpan::Range { start, end })
        }
    };

    Ok(Reference {
        book: book.name.clone(),
        chapter,
        verses,
    })
}

fn number(digits: Option<&str>) -> Result<u32, ParseError> {
    digits
        .and_then(|d| d.parse().ok())
        .ok_or(ParseError::UnrecognizedFormat)
}

fn verse(digits: &str) -> Result<u32, ParseError> {
    match number(Some(digits))? {
        0 => Err(ParseError::VerseOutOfRange),
        v => Ok(v),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn parse(input: &str) -> Result<Reference, ParseError> {
        parse_reference(input, &Catalogue::spanish())
    }

    #[test]
    fn parses_single_verse() {
        let r = parse("Juan 3:16").unwrap();
        assert_eq!(
            r,
            Reference { book: "Juan".to_string(), chapter: 3, verses: Some(VerseSpan::Single(16)) }
        );
    }

    #[test]
    fn parses_numbered_book_with_range() {
        let r = parse("1 Cronicas 20:1-5").unwrap();
        assert_eq!(r.book(), "1 Cronicas");
        assert_eq!(r.chapter(), 20);
        assert_eq!(r.verses(), Some(VerseSpan::Range { start: 1, end: 5 }));
    }

    #[test]
    fn parses_whole_chapter() {
        let r = parse("Juan 3").unwrap();
        assert_eq!(r.book(), "Juan");
        assert_eq!(r.chapter(), 3);
        assert_eq!(r.verses(), None);
    }

    #[test]
    fn tolerates_accents_case_and_spacing() {
        let r = parse("  1   CRÓNICAS 20:1-5 ").unwrap();
        assert_eq!(r.book(), "1 Cronicas");
        assert_eq!(parse("génesis 1").unwrap().book(), "Genesis");
        assert_eq!(parse("3 juan 1:4").unwrap().book(), "3 Juan");
    }

    #[test]
    fn every_catalogue_book_parses() {
        let catalogue = Catalogue::spanish();
        for book in catalogue.books() {
            for chapter in [1, 2, book.chapters] {
                let input = format!("{} {chapter}", normalize(&book.name));
                let r = parse_reference(&input, &catalogue).unwrap();
                assert_eq!(r.book(), book.name);
                assert_eq!(r.chapter(), chapter);
                assert_eq!(r.verses(), None);
            }
        }
    }

    #[test]
    fn unknown_book() {
        assert_eq!(parse("Xyzzy 3"), Err(ParseError::BookNotFound("xyzzy".to_string())));
        assert_eq!(parse("4 Juan 1"), Err(ParseError::UnrecognizedFormat));
    }

    #[test]
    fn unrecognized_format() {
        for input in ["not a reference", "", "Juan", "Juan 3:", "Juan 3:16-", "Juan 3:a", "1Juan 3", "3:16"] {
            assert_eq!(parse(input), Err(ParseError::UnrecognizedFormat), "input: {input:?}");
        }
    }

    #[test]
    fn enforces_reference_invariants() {
        assert_eq!(parse("Juan 0"), Err(ParseError::ChapterOutOfRange));
        assert_eq!(parse("Juan 3:0"), Err(ParseError::VerseOutOfRange));
        assert_eq!(parse("Juan 3:18-16"), Err(ParseError::InvertedRange { start: 18, end: 16 }));
        assert_eq!(parse("Juan 99999999999"), Err(ParseError::UnrecognizedFormat));
    }

    #[test]
    fn does_not_validate_chapter_count() {
        // Juan has 21 chapters; the provider decides.
        assert_eq!(parse("Juan 40").unwrap().chapter(), 40);
    }

    #[test]
    fn display_formats() {
        assert_eq!(parse("juan 3").unwrap().to_string(), "Juan 3");
        assert_eq!(parse("juan 3:16").unwrap().to_string(), "Juan 3:16");
        assert_eq!(parse("1 cronicas 20:1-5").unwrap().to_string(), "1 Cronicas 20:1-5");
        assert_eq!(ChapterPosition::new("Genesis", 2).to_string(), "Genesis 2");
    }

    #[test]
    fn format_round_trips() {
        for input in ["Juan 3", "juan 3:16", "1 crónicas 20:1-5", "SALMOS 119:105", "Rut 1:1-1"] {
            let first = parse(input).unwrap();
            let again = parse(&first.to_string()).unwrap();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn reference_position() {
        let r = parse("Juan 3:16").unwrap();
        assert_eq!(ChapterPosition::from(&r), ChapterPosition::new("Juan", 3));
    }

    #[test]
    fn every_book_of_a_custom_catalogue_parses() {
        let catalogue = Catalogue::from_books(vec![
            Book { name: "Tobías".to_string(), chapters: 14 },
            Book { name: "1 Macabeos".to_string(), chapters: 16 },
            Book { name: "Cantar de los Cantares".to_string(), chapters: 8 },
            Book { name: "Sabiduría".to_string(), chapters: 19 },
        ])
        .unwrap();

        for book in catalogue.books() {
            for chapter in [1, book.chapters, 200] {
                let input = format!("{} {chapter}", normalize(&book.name));
                let r = parse_reference(&input, &catalogue).unwrap();
                assert_eq!(r.book(), book.name);
                assert_eq!(r.chapter(), chapter);
                assert_eq!(r.verses(), None);
            }
        }
    }

    #[test]
    fn only_ascii_digits_are_numbers() {
        assert_eq!(parse("Juan ٣"), Err(ParseError::UnrecognizedFormat));
        assert_eq!(parse("Juan 3:١٦"), Err(ParseError::UnrecognizedFormat));
    }
}
