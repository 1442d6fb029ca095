//! Fetch passages and print them with superscript verse numbers.
//!
//! Usage: cargo run --bin dump_chapter -- "Juan 3" "Salmos 23:1-4"
//!
//! With no arguments the configured start reference is printed.

use std::sync::Arc;

use anyhow::{bail, Context};
use futures::future::join_all;
use lampara::bible::{parse_reference, render_superscript, Catalogue};
use lampara::config::Config;
use lampara::provider::TextApiClient;
use lampara::services::Navigator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;
    if !config.has_text_provider() {
        bail!("LAMPARA_API_URL is not set");
    }

    let catalogue = Catalogue::load(&config).context("Failed to load book catalogue")?;
    let mut inputs: Vec<String> = std::env::args().skip(1).collect();
    if inputs.is_empty() {
        inputs.push(config.start_reference.clone());
    }

    let references = inputs
        .iter()
        .map(|input| parse_reference(input, &catalogue).with_context(|| format!("Invalid reference '{input}'")))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let navigator = Navigator::new(Arc::new(TextApiClient::new(&config)));
    let results = join_all(references.into_iter().map(|reference| {
        let navigator = navigator.clone();
        async move {
            let label = reference.to_string();
            (label, navigator.load(reference).await)
        }
    }))
    .await;

    let mut failures = 0;
    for (label, result) in results {
        match result {
            Ok(text) => {
                println!("=== {} ({}) ===", text.reference, config.translation);
                println!("{}\n", render_superscript(&text.segments));
            }
            Err(e) => {
                failures += 1;
                eprintln!("=== {label} ===\n  Error: {e}\n");
            }
        }
    }

    if failures > 0 {
        bail!("{failures} passage(s) failed to load");
    }
    Ok(())
}
