//! Bible reference parsing, book catalogue and verse segmentation.
//!
//! Everything here is pure computation; fetching text lives in
//! [`crate::services`] and [`crate::provider`].

pub mod catalogue;
pub mod reference;
pub mod segment;

pub use catalogue::{Book, Catalogue};
pub use reference::{parse_reference, ChapterPosition, Reference, VerseSpan};
pub use segment::{render_superscript, segment, to_superscript, verse_rows, VerseRow, VerseSegment};

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold user input for comparison: decompose, drop diacritics, lower-case,
/// trim and collapse whitespace runs to a single space.
///
/// `"  1 Crónicas  "` and `"1 cronicas"` normalize to the same string.
pub fn normalize(input: &str) -> String {
    let stripped: String = input.nfd().filter(|c| !is_combining_mark(*c)).collect();
    stripped
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_accents_and_case() {
        assert_eq!(normalize("Génesis"), "genesis");
        assert_eq!(normalize("  1 Crónicas "), "1 cronicas");
        assert_eq!(normalize("ÉXODO"), "exodo");
        assert_eq!(normalize("Nehemías"), "nehemias");
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize("Juan\t 3:16"), "juan 3:16");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn normalize_folds_enye() {
        assert_eq!(normalize("Señor"), "senor");
    }
}
