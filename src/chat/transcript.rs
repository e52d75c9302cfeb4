//! Chat transcript model.
//!
//! The transcript owns every message; the stream client only ever emits
//! fragments, and the caller routes them into the in-progress message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in a conversation.
///
/// An assistant message starts empty with `in_progress = true` and grows by
/// fragment appends. Once the stream completes, errors, or is cancelled the
/// message is finalized and no longer mutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub in_progress: bool,
    pub failed: bool,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: Role, content: String, in_progress: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content,
            in_progress,
            failed: false,
            created_at: Utc::now(),
        }
    }
}

/// Ordered conversation, most recent message first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn get(&self, id: Uuid) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id == id)
    }

    fn get_mut(&mut self, id: Uuid) -> Option<&mut ChatMessage> {
        self.messages.iter_mut().find(|m| m.id == id)
    }

    /// Record a submitted prompt. User messages are complete on arrival.
    pub fn submit_prompt(&mut self, content: impl Into<String>) -> Uuid {
        let message = ChatMessage::new(Role::User, content.into(), false);
        let id = message.id;
        self.messages.insert(0, message);
        id
    }

    /// Start an assistant reply: empty content, in progress.
    pub fn begin_reply(&mut self) -> Uuid {
        let message = ChatMessage::new(Role::Assistant, String::new(), true);
        let id = message.id;
        self.messages.insert(0, message);
        id
    }

    /// Append a fragment to an in-progress message. Returns false if the
    /// message is unknown or already finalized.
    pub fn append_fragment(&mut self, id: Uuid, fragment: &str) -> bool {
        match self.get_mut(id) {
            Some(m) if m.in_progress => {
                m.content.push_str(fragment);
                true
            }
            _ => false,
        }
    }

    /// Finalize an in-progress message successfully. Returns false if the
    /// message is unknown or already finalized.
    pub fn complete(&mut self, id: Uuid) -> bool {
        match self.get_mut(id) {
            Some(m) if m.in_progress => {
                m.in_progress = false;
                true
            }
            _ => false,
        }
    }

    /// Finalize an in-progress message as failed. Returns false if the
    /// message is unknown or already finalized.
    pub fn fail(&mut self, id: Uuid) -> bool {
        match self.get_mut(id) {
            Some(m) if m.in_progress => {
                m.in_progress = false;
                m.failed = true;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_recent_first_ordering() {
        let mut t = Transcript::new();
        t.submit_prompt("first");
        t.submit_prompt("second");
        let contents: Vec<&str> = t.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["second", "first"]);
    }

    #[test]
    fn prompt_is_complete_on_arrival() {
        let mut t = Transcript::new();
        let id = t.submit_prompt("hello");
        let m = t.get(id).unwrap();
        assert_eq!(m.role, Role::User);
        assert!(!m.in_progress);
        assert!(!m.failed);
    }

    #[test]
    fn reply_grows_by_fragments() {
        let mut t = Transcript::new();
        let id = t.begin_reply();
        assert!(t.append_fragment(id, "Hel"));
        assert!(t.append_fragment(id, "lo"));
        assert_eq!(t.get(id).unwrap().content, "Hello");
        assert!(t.get(id).unwrap().in_progress);
    }

    #[test]
    fn completed_reply_is_immutable() {
        let mut t = Transcript::new();
        let id = t.begin_reply();
        t.append_fragment(id, "done");
        assert!(t.complete(id));
        assert!(!t.append_fragment(id, "more"));
        assert!(!t.complete(id));
        assert!(!t.fail(id));
        assert_eq!(t.get(id).unwrap().content, "done");
    }

    #[test]
    fn failed_reply_is_marked_and_immutable() {
        let mut t = Transcript::new();
        let id = t.begin_reply();
        t.append_fragment(id, "partial answer");
        assert!(t.fail(id));
        let m = t.get(id).unwrap();
        assert!(m.failed);
        assert!(!m.in_progress);
        assert!(!t.append_fragment(id, "x"));
    }

    #[test]
    fn unknown_id_is_rejected() {
        let mut t = Transcript::new();
        assert!(!t.append_fragment(Uuid::new_v4(), "x"));
        assert!(!t.complete(Uuid::new_v4()));
    }
}
