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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One turn in the conversation. Messages are append-only: created once,
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ConversationMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_serializes_lowercase() {
        let message = ConversationMessage::user("hi");
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"sender\":\"user\""));

        let message = ConversationMessage::bot("hello");
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"sender\":\"bot\""));
    }

    #[test]
    fn test_message_round_trips_through_json() {
        let message = ConversationMessage::bot("Welcome!");
        let json = serde_json::to_string(&message).unwrap();
        let restored: ConversationMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.text, "Welcome!");
        assert_eq!(restored.sender, Sender::Bot);
        assert_eq!(restored.timestamp, message.timestamp);
    }
}
