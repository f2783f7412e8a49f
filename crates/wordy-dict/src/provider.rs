#![forbid(unsafe_code)]

//! Dictionary provider: fetch a search page and extract an entry.

use tracing::{debug, warn};
use wordy_runtime::{LookupError, LookupRequest, LookupResponse, LookupResult, LookupService};

use crate::error::{ProviderError, Result};
use crate::extract::Extractor;

/// Search page the word is appended to.
pub const DAUM_SEARCH_URL: &str = "https://dic.daum.net/search.do?q=";

/// Retrieves a page body by URL.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String>;
}

impl<F> PageFetcher for F
where
    F: Fn(&str) -> Result<String>,
{
    fn fetch(&self, url: &str) -> Result<String> {
        self(url)
    }
}

/// Blocking HTTPS fetcher.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("wordy-dict/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self { client })
    }
}

#[cfg(feature = "http")]
impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }
        Ok(response.text()?)
    }
}

/// Fetches a word's search page and extracts its first entry.
#[derive(Debug, Clone)]
pub struct DictionaryProvider<F> {
    fetcher: F,
    extractor: Extractor,
    base_url: String,
}

impl<F: PageFetcher> DictionaryProvider<F> {
    pub fn new(fetcher: F) -> Result<Self> {
        Ok(Self {
            fetcher,
            extractor: Extractor::new()?,
            base_url: DAUM_SEARCH_URL.to_string(),
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The search URL for `word`.
    #[must_use]
    pub fn search_url(&self, word: &str) -> String {
        format!("{}{}", self.base_url, encode_query(word))
    }

    /// Look up a word. A page without results is an empty definition,
    /// not an error.
    pub fn define(&self, word: &str) -> Result<LookupResponse> {
        let url = self.search_url(word);
        debug!(%url, "fetching search page");
        let html = self.fetcher.fetch(&url)?;
        Ok(self.extractor.extract(&html))
    }

    /// Extract from an already fetched page.
    #[must_use]
    pub fn parse(&self, html: &str) -> LookupResponse {
        self.extractor.extract(html)
    }
}

impl<F: PageFetcher> LookupService for DictionaryProvider<F> {
    fn lookup(&mut self, request: &LookupRequest) -> LookupResult<LookupResponse> {
        self.define(request.text()).map_err(|err| {
            warn!(word = request.text(), error = %err, "dictionary fetch failed");
            LookupError::Transport(err.to_string())
        })
    }
}

/// Percent-encode a query value (RFC 3986 unreserved characters pass).
#[must_use]
pub fn encode_query(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
