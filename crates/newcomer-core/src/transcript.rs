//! Chat transcript state machine.
//!
//! `idle -> sending -> idle`. A submission appends the user's message right
//! away as a provisional entry; the outcome appends the bot's reply (or the
//! apology) and settles the provisional entry's delivery state. Messages
//! themselves are never edited or removed.

use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;

use crate::constants::{CHAT_APOLOGY, CHAT_GREETING};
use crate::models::{Delivery, Message, MessageIdGenerator, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptState {
    Idle,
    Sending,
}

/// A submission waiting for its outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    pub message_id: String,
    pub text: String,
}

#[derive(Debug)]
pub struct ChatTranscript {
    messages: Vec<Message>,
    ids: MessageIdGenerator,
    state: TranscriptState,
    pending: Option<PendingSend>,
    delivery: HashMap<String, Delivery>,
    error_banner: Option<String>,
    input: String,
}

impl ChatTranscript {
    pub fn new() -> Self {
        let mut transcript = Self {
            messages: Vec::new(),
            ids: MessageIdGenerator::new(),
            state: TranscriptState::Idle,
            pending: None,
            delivery: HashMap::new(),
            error_banner: None,
            input: String::new(),
        };
        transcript.append(Sender::Bot, CHAT_GREETING.to_string());
        transcript
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn state(&self) -> TranscriptState {
        self.state
    }

    /// The "assistant is thinking" indicator
    pub fn is_typing(&self) -> bool {
        self.state == TranscriptState::Sending
    }

    /// True once the user has said anything; before that the panel shows
    /// only the greeting
    pub fn has_user_messages(&self) -> bool {
        self.messages.iter().any(Message::is_from_user)
    }

    pub fn error_banner(&self) -> Option<&str> {
        self.error_banner.as_deref()
    }

    pub fn delivery(&self, message_id: &str) -> Option<Delivery> {
        self.delivery.get(message_id).copied()
    }

    /// The most recent user message whose send failed
    pub fn last_failed(&self) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .filter(|m| m.is_from_user())
            .find(|m| self.delivery(&m.id) == Some(Delivery::Failed))
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Submit the input buffer
    pub fn submit_input(&mut self) -> Option<PendingSend> {
        let text = self.input.clone();
        self.submit(&text)
    }

    /// Append the user's message and enter `sending`.
    ///
    /// Blank text is ignored, as is anything submitted while a send is
    /// already outstanding.
    pub fn submit(&mut self, text: &str) -> Option<PendingSend> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if self.state == TranscriptState::Sending {
            debug!("Submission ignored while a send is outstanding");
            return None;
        }

        let message_id = self.append(Sender::User, text.to_string());
        self.delivery.insert(message_id.clone(), Delivery::Pending);
        self.input.clear();
        self.state = TranscriptState::Sending;

        let pending = PendingSend {
            message_id,
            text: text.to_string(),
        };
        self.pending = Some(pending.clone());
        Some(pending)
    }

    /// Append the answer and clear the error banner.
    /// Returns false if nothing was being sent.
    pub fn resolve_success(&mut self, answer: &str) -> bool {
        let Some(pending) = self.settle(Delivery::Confirmed) else {
            return false;
        };
        debug!(message_id = %pending.message_id, "Send confirmed");
        self.append(Sender::Bot, answer.to_string());
        self.error_banner = None;
        true
    }

    /// Append the apology and raise the error banner with the detail.
    /// Returns false if nothing was being sent.
    pub fn resolve_failure(&mut self, detail: &str) -> bool {
        let Some(pending) = self.settle(Delivery::Failed) else {
            return false;
        };
        debug!(message_id = %pending.message_id, "Send failed");
        self.append(Sender::Bot, CHAT_APOLOGY.to_string());
        self.error_banner = Some(detail.to_string());
        true
    }

    fn settle(&mut self, delivery: Delivery) -> Option<PendingSend> {
        let pending = self.pending.take()?;
        self.delivery.insert(pending.message_id.clone(), delivery);
        self.state = TranscriptState::Idle;
        Some(pending)
    }

    fn append(&mut self, sender: Sender, text: String) -> String {
        let timestamp = Utc::now();
        let id = self.ids.next_id(timestamp);
        self.messages.push(Message {
            id: id.clone(),
            text,
            sender,
            timestamp,
        });
        id
    }
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seeded_with_greeting() {
        let transcript = ChatTranscript::new();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages()[0].text, CHAT_GREETING);
        assert_eq!(transcript.messages()[0].sender, Sender::Bot);
        assert!(!transcript.has_user_messages());
        assert_eq!(transcript.state(), TranscriptState::Idle);
    }

    #[test]
    fn test_whitespace_submission_is_noop() {
        let mut transcript = ChatTranscript::new();
        transcript.set_input("  ");
        assert!(transcript.submit_input().is_none());
        assert!(transcript.submit("\t\n").is_none());
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.state(), TranscriptState::Idle);
        assert_eq!(transcript.input(), "  ");
    }

    #[test]
    fn test_submit_appends_immediately_then_success() {
        let mut transcript = ChatTranscript::new();
        transcript.set_input("  Hello ");
        let pending = transcript.submit_input().unwrap();

        assert_eq!(pending.text, "Hello");
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.input(), "");
        assert!(transcript.is_typing());
        assert_eq!(transcript.delivery(&pending.message_id), Some(Delivery::Pending));

        assert!(transcript.resolve_success("Hi there"));
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.messages()[2].sender, Sender::Bot);
        assert_eq!(transcript.messages()[2].text, "Hi there");
        assert_eq!(transcript.delivery(&pending.message_id), Some(Delivery::Confirmed));
        assert!(!transcript.is_typing());
    }

    #[test]
    fn test_failure_appends_apology_and_banner() {
        let mut transcript = ChatTranscript::new();
        let pending = transcript.submit("Hello").unwrap();
        assert!(transcript.resolve_failure("HTTP error! status: 500"));

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.messages()[2].text, CHAT_APOLOGY);
        assert_eq!(transcript.error_banner(), Some("HTTP error! status: 500"));
        assert_eq!(transcript.delivery(&pending.message_id), Some(Delivery::Failed));
        assert_eq!(transcript.state(), TranscriptState::Idle);
        assert_eq!(transcript.last_failed().map(|m| m.text.as_str()), Some("Hello"));
    }

    #[test]
    fn test_banner_persists_until_next_success() {
        let mut transcript = ChatTranscript::new();
        transcript.submit("first").unwrap();
        transcript.resolve_failure("offline");

        transcript.submit("second").unwrap();
        assert_eq!(transcript.error_banner(), Some("offline"));
        transcript.resolve_failure("still offline");
        assert_eq!(transcript.error_banner(), Some("still offline"));

        transcript.submit("third").unwrap();
        transcript.resolve_success("back online");
        assert!(transcript.error_banner().is_none());
    }

    #[test]
    fn test_submit_rejected_while_sending() {
        let mut transcript = ChatTranscript::new();
        transcript.submit("one").unwrap();
        assert!(transcript.submit("two").is_none());
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_resolve_without_pending_is_ignored() {
        let mut transcript = ChatTranscript::new();
        assert!(!transcript.resolve_success("orphan"));
        assert!(!transcript.resolve_failure("orphan"));
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn test_message_ids_unique() {
        let mut transcript = ChatTranscript::new();
        for i in 0..5 {
            transcript.submit(&format!("question {}", i)).unwrap();
            transcript.resolve_success("answer");
        }
        let ids: HashSet<_> = transcript.messages().iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids.len(), transcript.len());
    }
}
