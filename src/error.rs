//! Application error types.
//!
//! Parse and navigation failures are detected locally; fetch failures come
//! back from the text provider and carry its message unchanged.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Why a free-text reference could not be turned into a [`Reference`](crate::bible::Reference).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input does not look like `<book> <chapter>[:<verse>[-<verse>]]`.
    #[error("unrecognized format")]
    UnrecognizedFormat,

    /// The book phrase matched no catalogue entry.
    #[error("book not found: {0}")]
    BookNotFound(String),

    /// Chapter 0 was requested.
    #[error("chapter must be at least 1")]
    ChapterOutOfRange,

    /// Verse 0 was requested.
    #[error("verse must be at least 1")]
    VerseOutOfRange,

    /// A verse range whose end precedes its start.
    #[error("verse range is inverted: {start}-{end}")]
    InvertedRange {
        /// First verse as written.
        start: u32,
        /// Last verse as written.
        end: u32,
    },
}

/// Why the chapter cursor could not move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Moving back from chapter 1.
    #[error("at first chapter")]
    AtFirstChapter,

    /// Moving forward past the largest representable chapter.
    #[error("chapter number overflow")]
    ChapterOverflow,
}

/// Failure reported by (or while talking to) the text provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    /// Human-readable reason, passed through from the provider when it sent one.
    pub message: String,
    /// HTTP status code, if the failure came from an HTTP response.
    pub status: Option<u16>,
    /// Actionable suggestion for resolving the error.
    pub hint: Option<&'static str>,
}

impl FetchError {
    /// Create a fetch error without status context
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            hint: None,
        }
    }

    /// Create a fetch error from an HTTP status, attaching a hint where one helps
    pub fn with_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            401 | 403 => Some("Check LAMPARA_API_KEY"),
            404 => Some("The provider does not have that passage"),
            429 => Some("Rate limited - wait a moment and try again"),
            500..=599 => Some("Text provider error - try again later"),
            _ => None,
        };
        Self {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// Create a fetch error for a client with no endpoint configured
    pub fn not_configured() -> Self {
        Self {
            message: "text provider not configured".to_string(),
            status: None,
            hint: Some("Set LAMPARA_API_URL in the environment or .env file"),
        }
    }
}

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// Reference parsing failed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Chapter navigation failed
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Passage fetch failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Book catalogue is unusable
    #[error("Catalogue error: {0}")]
    Catalogue(String),

    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Message suitable for the reader's error overlay: the inner reason plus any hint.
    pub fn user_message(&self) -> String {
        match self {
            Self::Parse(e) => e.to_string(),
            Self::Navigation(e) => e.to_string(),
            Self::Fetch(e) => match e.hint {
                Some(hint) => format!("{} ({hint})", e.message),
                None => e.message.clone(),
            },
            other => other.to_string(),
        }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn parse_error_messages() {
        assert_eq!(ParseError::UnrecognizedFormat.to_string(), "unrecognized format");
        assert_eq!(
            ParseError::BookNotFound("xyzzy".to_string()).to_string(),
            "book not found: xyzzy"
        );
    }

    #[test]
    fn fetch_status_provides_hints() {
        let err = FetchError::with_status("Unauthorized", 401);
        assert_eq!(err.status, Some(401));
        assert!(err.hint.is_some_and(|h| h.contains("LAMPARA_API_KEY")));

        let err = FetchError::with_status("Teapot", 418);
        assert!(err.hint.is_none());
    }

    #[test]
    fn fetch_message_passes_through() {
        let err: Error = FetchError::new("capitulo inexistente").into();
        assert_eq!(err.user_message(), "capitulo inexistente");

        let err: Error = FetchError::not_configured().into();
        assert!(err.user_message().contains("LAMPARA_API_URL"));
    }

    #[test]
    fn config_error_carries_hint() {
        let err = Error::config("LAMPARA_TIMEOUT_SECS must be a positive number", "Set it to e.g. 30");
        assert_eq!(
            err.user_message(),
            "Configuration error: LAMPARA_TIMEOUT_SECS must be a positive number. Set it to e.g. 30"
        );
    }

    #[test]
    fn navigation_error_converts() {
        let err: Error = NavigationError::AtFirstChapter.into();
        assert!(matches!(err, Error::Navigation(NavigationError::AtFirstChapter)));
        assert_eq!(err.user_message(), "at first chapter");
    }
}
