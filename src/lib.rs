//! Rust client for Firecrawl's extract API.
//!
//! Ask a natural-language question about a web page. The client submits an
//! extraction job, polls it once per interval until the API reports a
//! terminal status, and hands back the extracted data.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use firecrawl_extract::{extract_info_from_web_page, Credentials, ExtractionRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), firecrawl_extract::Error> {
//!     let result = extract_info_from_web_page(
//!         &ExtractionRequest::new(
//!             "https://example.com/pricing",
//!             "What does the cheapest plan cost?",
//!         ),
//!         &Credentials::new("fc-your-api-key"),
//!     )
//!     .await?;
//!
//!     println!("{}", result.message);
//!     println!("{:#}", result.data);
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod poll;
mod types;
mod version;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use poll::{PollConfig, DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL};
pub use types::*;
pub use version::SDK_VERSION;

/// Run an extraction with a default-configured [`Client`].
pub async fn extract_info_from_web_page(
    request: &ExtractionRequest,
    credentials: &Credentials,
) -> Result<ExtractionResult> {
    Client::builder().build()?.extract(request, credentials).await
}
