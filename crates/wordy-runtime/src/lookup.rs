#![forbid(unsafe_code)]

//! Dictionary lookup wire protocol and client seam.
//!
//! The content side talks to the dictionary provider by message passing.
//! A request is `{"type": "word", "data": "<word>"}`; a response carries the
//! definition text and two pronunciation entries. [`LookupService`] is the
//! seam the runtime calls; [`MessageLookup`] adapts any JSON string
//! transport to it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message sent to the dictionary provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum LookupRequest {
    /// Look up a validated word, forwarded verbatim.
    Word(String),
}

impl LookupRequest {
    #[must_use]
    pub fn word(word: impl Into<String>) -> Self {
        Self::Word(word.into())
    }

    /// The word being looked up.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Word(word) => word,
        }
    }
}

/// A phonetic symbol and the audio clip that speaks it.
///
/// Empty strings mean "not available".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pronunciation {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub href: String,
}

impl Pronunciation {
    #[must_use]
    pub fn new(symbol: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            href: href.into(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbol.is_empty() && self.href.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pronunciations {
    #[serde(default)]
    pub american: Pronunciation,
    #[serde(default)]
    pub british: Pronunciation,
}

/// Provider reply. An empty `definition` means nothing was found.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LookupResponse {
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub pronunciations: Pronunciations,
}

impl LookupResponse {
    #[must_use]
    pub fn new(definition: impl Into<String>, pronunciations: Pronunciations) -> Self {
        Self {
            definition: definition.into(),
            pronunciations,
        }
    }

    /// The reply used when the provider failed.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definition.trim().is_empty()
    }
}

/// Why a lookup did not produce a definition.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The message channel or the provider's transport failed.
    #[error("lookup transport failed: {0}")]
    Transport(String),
    /// The provider answered but found nothing.
    #[error("no definition found")]
    EmptyDefinition,
    /// The provider's reply could not be decoded.
    #[error("malformed lookup response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl LookupError {
    /// Text shown in the tooltip when the lookup fails.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyDefinition => "No definition found for this word.",
            Self::Transport(_) => "The dictionary could not be reached.",
            Self::Malformed(_) => "The dictionary sent an unreadable answer.",
        }
    }
}

pub type LookupResult<T> = Result<T, LookupError>;

/// Performs dictionary lookups.
pub trait LookupService {
    fn lookup(&mut self, request: &LookupRequest) -> LookupResult<LookupResponse>;
}

impl<F> LookupService for F
where
    F: FnMut(&LookupRequest) -> LookupResult<LookupResponse>,
{
    fn lookup(&mut self, request: &LookupRequest) -> LookupResult<LookupResponse> {
        self(request)
    }
}

/// A channel that delivers one JSON message and returns the JSON reply.
pub trait MessageTransport {
    fn send_message(&mut self, message: &str) -> Result<String, String>;
}

/// [`LookupService`] over a [`MessageTransport`].
#[derive(Debug, Clone)]
pub struct MessageLookup<T> {
    transport: T,
}

impl<T: MessageTransport> MessageLookup<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: MessageTransport> LookupService for MessageLookup<T> {
    fn lookup(&mut self, request: &LookupRequest) -> LookupResult<LookupResponse> {
        let message = serde_json::to_string(request)?;
        let reply = self
            .transport
            .send_message(&message)
            .map_err(LookupError::Transport)?;
        Ok(serde_json::from_str(&reply)?)
    }
}
