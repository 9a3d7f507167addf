// ABOUTME: Main library entry point for the wordglass word analyzer.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, WordReport, AnalyzeError, ErrorCode, Options.

//! Wordglass - fetches a webpage and reports which of its words are
//! palindromes and which pairs are anagrams of one another.
//!
//! Text is taken from heading, paragraph, code, and list-item elements,
//! tokenized on whitespace, and deduplicated case-sensitively before
//! classification.
//!
//! # Example
//!
//! ```no_run
//! use wordglass_analysis::{AnalyzeError, Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AnalyzeError> {
//!     let client = Client::builder().build();
//!     let report = client.analyze("https://example.com/page").await?;
//!     println!("{}", report.format_text());
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod client;
pub mod error;
pub mod extract;
pub mod options;
pub mod report;
pub mod resource;

pub use crate::classify::{find_anagram_pairs, find_palindromes, is_anagram_pair, Palindrome};
pub use crate::client::Client;
pub use crate::error::{AnalyzeError, ErrorCode};
pub use crate::extract::{extract_words, is_retained_tag};
pub use crate::options::{ClientBuilder, Options};
pub use crate::report::{WordReport, ANAGRAM_BANNER, PALINDROME_BANNER};
