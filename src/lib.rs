//! `Lámpara` - terminal Bible reader.
//!
//! Parses free-text Spanish references ("Juan 3:16", "1 Crónicas 20:1-5"),
//! fetches passage text from a backend edge function and renders it with
//! superscript verse numbers.

// Re-export public modules for use in integration tests and as a library
pub mod app;
pub mod bible;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod provider;
pub mod services;
pub mod ui;
