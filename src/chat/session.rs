// Copyright 2026 Muvon Un Limited
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;

use crate::chat::types::ConversationMessage;
use crate::storage::KeyValueStore;

const MESSAGES_KEY: &str = "chatbot_messages";
const IS_OPEN_KEY: &str = "chatbot_is_open";
const SESSION_ID_KEY: &str = "chatbot_session_id";

/// Persists conversation state and identity across runs. Every accessor
/// tolerates a broken store: reads fall back, writes are dropped silently
/// and the conversation continues in memory only.
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored message history, or the fallback when absent or corrupt.
    pub fn load_messages(&self, fallback: Vec<ConversationMessage>) -> Vec<ConversationMessage> {
        match self.store.get(MESSAGES_KEY) {
            Some(saved) => serde_json::from_str(&saved).unwrap_or(fallback),
            None => fallback,
        }
    }

    /// Write the full message list; called after every change.
    pub fn save_messages(&self, messages: &[ConversationMessage]) {
        if let Ok(serialized) = serde_json::to_string(messages) {
            self.store.set(MESSAGES_KEY, &serialized);
        }
    }

    pub fn load_is_open(&self) -> bool {
        self.store.get(IS_OPEN_KEY).as_deref() == Some("true")
    }

    pub fn save_is_open(&self, is_open: bool) {
        self.store.set(IS_OPEN_KEY, if is_open { "true" } else { "false" });
    }

    /// Durable session identity: read the stored id, or mint and persist a
    /// fresh one. Returns None only when the store cannot hold the id.
    pub fn get_or_create_session_id(&self) -> Option<String> {
        if let Some(session_id) = self.store.get(SESSION_ID_KEY) {
            return Some(session_id);
        }

        let timestamp = Utc::now().timestamp_millis().max(0) as u128;
        let random: u32 = rand::rng().random();
        let session_id = format!(
            "ccb-{}-{}",
            to_base36(timestamp),
            to_base36(random as u128)
        );

        if self.store.set(SESSION_ID_KEY, &session_id) {
            Some(session_id)
        } else {
            None
        }
    }

    /// Forget the displayed conversation. The session id survives: identity
    /// is durable across a chat reset.
    pub fn clear_session(&self) {
        self.store.remove(MESSAGES_KEY);
        self.store.remove(IS_OPEN_KEY);
    }
}

fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut encoded = Vec::new();
    while value > 0 {
        encoded.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    encoded.reverse();
    String::from_utf8(encoded).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }
        fn set(&self, _key: &str, _value: &str) -> bool {
            false
        }
        fn remove(&self, _key: &str) {}
    }

    fn manager() -> SessionManager {
        SessionManager::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_messages_round_trip() {
        let session = manager();
        let messages = vec![
            ConversationMessage::bot("Welcome!"),
            ConversationMessage::user("hi"),
        ];
        session.save_messages(&messages);

        let restored = session.load_messages(Vec::new());
        assert_eq!(restored.len(), 2);
        assert_eq!(restored[0].text, "Welcome!");
        assert_eq!(restored[1].text, "hi");
        assert_eq!(restored[0].timestamp, messages[0].timestamp);
    }

    #[test]
    fn test_missing_messages_return_fallback() {
        let session = manager();
        let fallback = vec![ConversationMessage::bot("Welcome!")];
        let loaded = session.load_messages(fallback.clone());
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].text, fallback[0].text);
    }

    #[test]
    fn test_corrupt_messages_return_fallback() {
        let store = Arc::new(MemoryStore::new());
        store.set(MESSAGES_KEY, "{not json");
        let session = SessionManager::new(store);

        let loaded = session.load_messages(vec![ConversationMessage::bot("Welcome!")]);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].text, "Welcome!");
    }

    #[test]
    fn test_is_open_round_trip() {
        let session = manager();
        assert!(!session.load_is_open());
        session.save_is_open(true);
        assert!(session.load_is_open());
        session.save_is_open(false);
        assert!(!session.load_is_open());
    }

    #[test]
    fn test_session_id_is_minted_once() {
        let session = manager();
        let first = session.get_or_create_session_id().unwrap();
        assert!(first.starts_with("ccb-"));
        let second = session.get_or_create_session_id().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_session_id_unavailable_store() {
        let session = SessionManager::new(Arc::new(BrokenStore));
        assert!(session.get_or_create_session_id().is_none());
    }

    #[test]
    fn test_clear_keeps_session_id() {
        let session = manager();
        session.save_messages(&[ConversationMessage::user("hi")]);
        session.save_is_open(true);
        let session_id = session.get_or_create_session_id().unwrap();

        session.clear_session();

        assert!(session.load_messages(Vec::new()).is_empty());
        assert!(!session.load_is_open());
        assert_eq!(session.get_or_create_session_id().unwrap(), session_id);
    }

    #[test]
    fn test_base36_encoding() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
