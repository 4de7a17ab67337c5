//! # rustpubmed
//!
//! PubMed E-utilities abstract harvester.
//!
//! ## Modules
//!
//! - [`esearch`] - Query session initiation (`<Count>`, `WebEnv`, `QueryKey`)
//! - [`efetch`] - Paginated, throttled batch retrieval
//! - [`segment`] - Plaintext record/field segmentation and completeness routing
//! - [`pipeline`] - The three steps composed
//! - [`output`] - CSV and summary writers
//! - [`client`] / [`config`] - HTTP plumbing and settings
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rustpubmed::{client::EutilsClient, config::EutilsConfig, pipeline, segment::DelimiterSegmenter};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = EutilsClient::new(EutilsConfig::default().with_page_size(100))?;
//!     let outcome = pipeline::run(&client, "zebrafish heart regeneration", &DelimiterSegmenter).await?;
//!     println!("{} complete, {} partial", outcome.table.complete.len(), outcome.table.partial.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod efetch;
pub mod error;
pub mod esearch;
pub mod output;
pub mod pipeline;
pub mod segment;

pub use error::{PubmedError, Result};
