#![forbid(unsafe_code)]

//! Message handler on the provider side of the lookup channel.
//!
//! Every message gets a reply. Undecodable requests and provider failures
//! are answered with an empty definition, which the content side treats as
//! a failed lookup.

use tracing::warn;
use wordy_runtime::{LookupRequest, LookupResponse, LookupService, MessageTransport};

/// Answers lookup messages with a [`LookupService`].
#[derive(Debug, Clone)]
pub struct MessageHandler<S> {
    service: S,
}

impl<S: LookupService> MessageHandler<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Handle a decoded request.
    pub fn respond(&mut self, request: &LookupRequest) -> LookupResponse {
        match self.service.lookup(request) {
            Ok(response) => response,
            Err(err) => {
                warn!(word = request.text(), error = %err, "answering with empty definition");
                LookupResponse::empty()
            }
        }
    }

    /// Handle one JSON message and produce the JSON reply.
    pub fn handle(&mut self, message: &str) -> String {
        let response = match serde_json::from_str::<LookupRequest>(message) {
            Ok(request) => self.respond(&request),
            Err(err) => {
                warn!(error = %err, "undecodable lookup message");
                LookupResponse::empty()
            }
        };
        serde_json::to_string(&response).unwrap_or_else(|_| r#"{"definition":""}"#.to_string())
    }
}

/// In-process channel: the content side's transport is the handler itself.
impl<S: LookupService> MessageTransport for MessageHandler<S> {
    fn send_message(&mut self, message: &str) -> Result<String, String> {
        Ok(self.handle(message))
    }
}
