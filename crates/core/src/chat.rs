//! Chat view: follow-up questions about the stored media link.
//!
//! Replies are appended in the order they settle, not the order questions
//! were asked. There is no sequencing token on the wire to do better.
//!
//! Loading is an in-flight count, not a flag: with two overlapping sends it
//! stays on until both replies have settled. Front-ends disable sending while
//! loading, so a single request is in flight in practice.

use tracing::{error, info, warn};

use crate::{
    session::Session,
    types::{Outcome, SummarizeRequest, Turn},
};

pub const MISSING_LINK_MESSAGE: &str =
    "No YouTube URL found. Please go back and enter a valid YouTube URL first.";
pub const INVALID_RESPONSE_MESSAGE: &str = "Received an invalid response format from the server.";
pub const FAILURE_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";
pub const THINKING: &str = "Thinking...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input, nothing happened.
    Ignored,
    /// No stored link; an explanation was appended instead of a request.
    MissingLink,
    Dispatched(SummarizeRequest),
}

#[derive(Debug, Clone, Default)]
pub struct ChatView {
    transcript: Vec<Turn>,
    input: String,
    in_flight: usize,
}

impl ChatView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn can_send(&self) -> bool {
        !self.is_loading() && !self.input.trim().is_empty()
    }

    /// Send the pending input.
    pub fn send(&mut self, session: &Session) -> SendOutcome {
        let text = self.input.clone();
        self.send_message(session, text)
    }

    pub fn send_message(&mut self, session: &Session, text: impl Into<String>) -> SendOutcome {
        let text = text.into();
        if text.trim().is_empty() {
            return SendOutcome::Ignored;
        }

        let link = match session.media_link() {
            Ok(Some(link)) => link,
            Ok(None) => {
                self.transcript.push(Turn::assistant(MISSING_LINK_MESSAGE));
                return SendOutcome::MissingLink;
            }
            Err(e) => {
                warn!(error = %e, "could not read stored media link");
                self.transcript.push(Turn::assistant(MISSING_LINK_MESSAGE));
                return SendOutcome::MissingLink;
            }
        };

        info!(youtube_url = %link, "chat question sent");
        self.transcript.push(Turn::user(text.clone()));
        self.input.clear();
        self.in_flight += 1;
        SendOutcome::Dispatched(SummarizeRequest::with_query(link, text))
    }

    /// Append the assistant turn for one settled request.
    pub fn reply_settled(&mut self, outcome: Outcome) {
        self.in_flight = self.in_flight.saturating_sub(1);

        let content = match outcome {
            Outcome::Answered(answer) => answer,
            Outcome::Malformed => INVALID_RESPONSE_MESSAGE.to_string(),
            Outcome::Failed(reason) => {
                error!(%reason, "error fetching chat response");
                FAILURE_MESSAGE.to_string()
            }
        };
        self.transcript.push(Turn::assistant(content));
    }
}
