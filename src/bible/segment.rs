//! Splitting fetched chapter text on inline `[n]` verse markers.

use std::sync::LazyLock;

use regex::Regex;

/// Inline verse marker such as `[16]`.
#[allow(clippy::expect_used)]
static RE_VERSE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([0-9]+)\]").expect("valid regex: RE_VERSE_MARKER"));

/// Superscript digit mapping
const SUPERSCRIPT_DIGITS: &[char] = &['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// One renderable piece of a chapter: either a verse marker or a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseSegment {
    /// Verse number for marker segments, `None` for text runs.
    pub verse: Option<u32>,
    /// Text of the run; always empty for marker segments.
    pub text: String,
}

impl VerseSegment {
    /// A marker segment.
    pub const fn marker(verse: u32) -> Self {
        Self { verse: Some(verse), text: String::new() }
    }

    /// A text segment.
    pub fn text(text: impl Into<String>) -> Self {
        Self { verse: None, text: text.into() }
    }
}

/// A verse number paired with the text that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseRow {
    /// Verse number, `None` for text that precedes the first marker.
    pub verse: Option<u32>,
    /// Verse text with surrounding whitespace trimmed.
    pub text: String,
}

/// Split raw chapter text on `[n]` markers, preserving order.
///
/// Markers become segments with `verse` set and empty text. Text between
/// markers becomes a segment with leading whitespace removed; runs that are
/// blank are dropped. A marker too large for `u32` stays in the text.
pub fn segment(raw: &str) -> Vec<VerseSegment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in RE_VERSE_MARKER.captures_iter(raw) {
        let (Some(whole), Some(digits)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Ok(verse) = digits.as_str().parse::<u32>() else {
            continue;
        };
        push_run(&mut segments, raw.get(last..whole.start()).unwrap_or_default());
        segments.push(VerseSegment::marker(verse));
        last = whole.end();
    }
    push_run(&mut segments, raw.get(last..).unwrap_or_default());

    segments
}

fn push_run(segments: &mut Vec<VerseSegment>, run: &str) {
    if run.trim().is_empty() {
        return;
    }
    segments.push(VerseSegment::text(run.trim_start()));
}

/// Pair each marker with the text after it, one row per verse.
pub fn verse_rows(segments: &[VerseSegment]) -> Vec<VerseRow> {
    let mut rows: Vec<VerseRow> = Vec::new();
    for seg in segments {
        match (seg.verse, rows.last_mut()) {
            (Some(verse), _) => rows.push(VerseRow { verse: Some(verse), text: String::new() }),
            (None, Some(row)) if row.text.is_empty() => row.text = seg.text.trim().to_string(),
            (None, Some(row)) => {
                row.text.push(' ');
                row.text.push_str(seg.text.trim());
            }
            (None, None) => rows.push(VerseRow { verse: None, text: seg.text.trim().to_string() }),
        }
    }
    rows
}

/// Convert a number to superscript Unicode characters
pub fn to_superscript(n: u32) -> String {
    n.to_string()
        .chars()
        .map(|c| {
            c.to_digit(10)
                .and_then(|d| SUPERSCRIPT_DIGITS.get(d as usize))
                .copied()
                .unwrap_or(c)
        })
        .collect()
}

/// Flatten segments into one string with superscript verse numbers
/// ("¹En el principio ²Y la tierra").
pub fn render_superscript(segments: &[VerseSegment]) -> String {
    let mut out = String::new();
    for seg in segments {
        match seg.verse {
            Some(verse) => {
                if !out.is_empty() && !out.ends_with(char::is_whitespace) {
                    out.push(' ');
                }
                out.push_str(&to_superscript(verse));
            }
            None => out.push_str(&seg.text),
        }
    }
    out.trim_end().to_string()
}
