//! Ask a question about a web page.
//!
//! Run with:
//! `FIRECRAWL_API_KEY=fc-... cargo run --example extract_page -- <url> <question>`

use colored::Colorize;
use firecrawl_extract::{Client, Credentials, Error, ExtractionRequest, SDK_VERSION};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} ({elapsed})")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let mut args = std::env::args().skip(1);
    let url = args.next().unwrap_or_else(|| "https://example.com".into());
    let question = args
        .next()
        .unwrap_or_else(|| "What is the purpose of this page?".into());
    let api_key = std::env::var("FIRECRAWL_API_KEY").unwrap_or_default();

    println!("{} {}", "firecrawl-extract".bold().blue(), SDK_VERSION.dimmed());
    println!("  {}: {}", "URL".dimmed(), url);
    println!("  {}: {}", "Question".dimmed(), question);
    println!();

    let mut builder = Client::builder();
    if let Ok(base_url) = std::env::var("FIRECRAWL_BASE_URL") {
        builder = builder.base_url(base_url);
    }
    let client = builder.build()?;

    let pb = spinner("Extracting...");
    let outcome = client
        .extract(
            &ExtractionRequest::new(url, question),
            &Credentials::new(api_key),
        )
        .await;
    pb.finish_and_clear();

    match outcome {
        Ok(result) => {
            println!("{} {}", "✔".green(), result.message);
            let formatted = serde_json::to_string_pretty(&result.data).unwrap_or_default();
            println!("{}", formatted);
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✖".red(), e);
            Err(e)
        }
    }
}
