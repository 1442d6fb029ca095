//! Passage text provider integration.
//!
//! Talks to the backend edge function that proxies the third-party
//! Bible-text API.

/// HTTP client for the edge function
pub mod api;
/// Request and response bodies
pub mod types;

// Re-export key components
pub use api::TextApiClient;
