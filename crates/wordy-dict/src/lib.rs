#![forbid(unsafe_code)]

//! Provider side of Wordy lookups.
//!
//! [`DictionaryProvider`] fetches a search page for a word and extracts the
//! first entry. [`MessageHandler`] answers JSON lookup messages with it, and
//! doubles as an in-process [`wordy_runtime::MessageTransport`] for the
//! content side.

pub mod cli;
pub mod error;
pub mod extract;
pub mod handler;
pub mod provider;

pub use cli::{run, run_from_env};
pub use error::{ProviderError, Result};
pub use extract::{Extractor, secure_link};
pub use handler::MessageHandler;
#[cfg(feature = "http")]
pub use provider::HttpFetcher;
pub use provider::{DAUM_SEARCH_URL, DictionaryProvider, PageFetcher, encode_query};
