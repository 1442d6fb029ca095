//! Wire types for the text edge function.
//!
//! Responses are decoded into [`TextResponse`] before anything else looks at
//! them; a body of the wrong shape becomes a [`FetchError`] instead of a
//! missing value further down.

use serde::{Deserialize, Serialize};

use crate::bible::VerseSpan;
use crate::error::FetchError;

/// JSON body posted to the edge function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRequest<'a> {
    /// Canonical book name.
    pub book: &'a str,
    /// Chapter number.
    pub chapter: u32,
    /// Translation code (e.g. "RVR1960").
    pub translation: &'a str,
    /// First verse, when only part of the chapter is wanted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verse_start: Option<u32>,
    /// Last verse, when only part of the chapter is wanted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verse_end: Option<u32>,
}

impl<'a> TextRequest<'a> {
    /// Request for a whole chapter.
    pub const fn chapter(book: &'a str, chapter: u32, translation: &'a str) -> Self {
        Self {
            book,
            chapter,
            translation,
            verse_start: None,
            verse_end: None,
        }
    }

    /// Request for selected verses.
    pub const fn verses(book: &'a str, chapter: u32, verses: VerseSpan, translation: &'a str) -> Self {
        Self {
            book,
            chapter,
            translation,
            verse_start: Some(verses.start()),
            verse_end: Some(verses.end()),
        }
    }
}

/// JSON body returned by the edge function.
///
/// Other fields the provider sends (such as its own `reference`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TextResponse {
    /// Passage text with inline `[n]` verse markers.
    #[serde(default)]
    pub text: Option<String>,
    /// Provider-side failure reason.
    #[serde(default)]
    pub error: Option<String>,
}

/// Turn an HTTP status and body into passage text or a [`FetchError`].
///
/// The provider's own `error` message is preferred over generic wording so
/// the reader can show it verbatim.
pub fn decode(status: u16, body: &str) -> Result<String, FetchError> {
    let parsed = serde_json::from_str::<TextResponse>(body);

    if !(200..300).contains(&status) {
        let message = parsed
            .ok()
            .and_then(|r| r.error)
            .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
            .unwrap_or_else(|| format!("provider returned status {status}"));
        return Err(FetchError::with_status(message, status));
    }

    let response = parsed.map_err(|e| {
        FetchError::with_status(format!("unexpected response from provider: {e}"), status)
    })?;

    if let Some(error) = response.error {
        return Err(FetchError::with_status(error, status));
    }

    match response.text {
        None => Err(FetchError::with_status("provider response is missing 'text'", status)),
        Some(text) if text.trim().is_empty() => {
            Err(FetchError::with_status("provider returned an empty passage", status))
        }
        Some(text) => Ok(text),
    }
}
