//! Client-side chat state: the local message log and the echo policy.
//!
//! [`ChatSession`] does no I/O. The transport feeds it outgoing bodies and
//! incoming broadcasts and it decides what lands in the log.

use std::fmt;
use std::str::FromStr;

use crate::domain::ChatMessage;

/// How a client treats messages it sent itself.
///
/// The hub echoes every message back to its sender, so a client must pick
/// exactly one of these. Mixing them shows own messages twice or not at
/// all until the round trip completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EchoPolicy {
    /// Append own messages on send; drop broadcasts carrying our own name.
    #[default]
    Optimistic,
    /// Append nothing on send; every broadcast, own ones included, is logged.
    BroadcastOnly,
}

impl FromStr for EchoPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "optimistic" => Ok(Self::Optimistic),
            "broadcast" | "broadcast_only" | "broadcast-only" => Ok(Self::BroadcastOnly),
            other => Err(format!(
                "unknown echo policy {other:?}, expected \"optimistic\" or \"broadcast\""
            )),
        }
    }
}

impl fmt::Display for EchoPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optimistic => f.write_str("optimistic"),
            Self::BroadcastOnly => f.write_str("broadcast"),
        }
    }
}

/// One user's view of the chat.
#[derive(Debug, Clone)]
pub struct ChatSession {
    user_name: String,
    policy: EchoPolicy,
    log: Vec<ChatMessage>,
}

impl ChatSession {
    /// Starts an empty session for `user_name`. The name is not validated.
    #[must_use]
    pub fn new(user_name: impl Into<String>, policy: EchoPolicy) -> Self {
        Self {
            user_name: user_name.into(),
            policy,
            log: Vec::new(),
        }
    }

    /// Name this session connected with.
    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Active echo policy.
    #[must_use]
    pub const fn policy(&self) -> EchoPolicy {
        self.policy
    }

    /// Messages in display order.
    #[must_use]
    pub fn log(&self) -> &[ChatMessage] {
        &self.log
    }

    /// Builds the outgoing message for `body`.
    ///
    /// Returns `None` and leaves the log untouched when `body` is empty.
    /// Under [`EchoPolicy::Optimistic`] the message is also appended.
    pub fn compose(&mut self, body: &str) -> Option<ChatMessage> {
        if body.is_empty() {
            return None;
        }
        let message = ChatMessage::new(self.user_name.as_str(), body);
        if self.policy == EchoPolicy::Optimistic {
            self.log.push(message.clone());
        }
        Some(message)
    }

    /// Applies an incoming broadcast. Returns `true` if it was appended.
    ///
    /// Under [`EchoPolicy::Optimistic`], anything carrying our own name is
    /// treated as the echo of a message already in the log. Another user
    /// who picked the same name is suppressed too.
    pub fn on_broadcast(&mut self, message: ChatMessage) -> bool {
        if self.policy == EchoPolicy::Optimistic && self.is_own(&message) {
            return false;
        }
        self.log.push(message);
        true
    }

    /// Whether `message` should be shown as our own.
    #[must_use]
    pub fn is_own(&self, message: &ChatMessage) -> bool {
        message.user == self.user_name
    }

    /// Formats one log line, own messages marked with `>`.
    #[must_use]
    pub fn render_line(&self, message: &ChatMessage) -> String {
        let marker = if self.is_own(message) { '>' } else { ' ' };
        format!("{marker} {}: {}", message.user, message.message)
    }
}
