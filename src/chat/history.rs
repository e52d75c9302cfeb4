//! Chat history types.
//!
//! The backend keeps the conversation for a session and returns it as a
//! JSON list, oldest first. Fetching lives on
//! [`ChatClient::history`](crate::chat::ChatClient::history).

use serde::{Deserialize, Serialize};

use super::transcript::Role;

/// One stored exchange entry returned by the history endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_shape() {
        let body = r#"[
            {"role": "user", "content": "hi"},
            {"role": "assistant", "content": "hello there"}
        ]"#;
        let entries: Vec<HistoryEntry> = serde_json::from_str(body).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role, Role::User);
        assert_eq!(entries[1].content, "hello there");
    }
}
