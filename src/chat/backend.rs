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

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::BackendConfig;
use crate::knowledge::types::ContextItem;

/// Returned when the backend answers without a usable reply field.
pub const DEFAULT_BACKEND_REPLY: &str = "I'm sorry, I couldn't generate a response right now.";

/// History role as the backend expects it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub role: Role,
    pub content: String,
}

/// Payload for one fallback query
#[derive(Debug, Clone, Serialize)]
pub struct BackendQuery {
    pub message: String,
    pub context: Vec<ContextItem>,
    pub history: Vec<HistoryItem>,
    pub session_id: Option<String>,
}

/// Remote conversational responder consulted when local matching is not
/// confident enough.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send_query(&self, query: &BackendQuery) -> Result<String>;
}

/// HTTP client for the chatbot backend endpoint.
pub struct HttpChatBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpChatBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("campuschat/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send_query(&self, query: &BackendQuery) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(query)
            .send()
            .await
            .context("Failed to reach the chatbot backend")?;

        let status = response.status();
        let data: Value = response
            .json()
            .await
            .context("Chatbot backend returned a non-JSON body")?;

        if !status.is_success() {
            // Body error text is for logs only; callers show their own apology.
            let detail = data
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("request failed");
            anyhow::bail!("Chatbot backend returned {status}: {detail}");
        }

        let reply = ["reply", "message"]
            .iter()
            .filter_map(|field| data.get(*field).and_then(Value::as_str))
            .find(|text| !text.is_empty())
            .unwrap_or(DEFAULT_BACKEND_REPLY);

        Ok(reply.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_serializes_with_expected_shape() {
        let query = BackendQuery {
            message: "admission requirements".to_string(),
            context: vec![ContextItem {
                title: "Admissions".to_string(),
                url: "/admissions".to_string(),
                summary: "Admission requirements and enrollment process.".to_string(),
            }],
            history: vec![HistoryItem {
                role: Role::User,
                content: "admission requirements".to_string(),
            }],
            session_id: Some("ccb-abc-123".to_string()),
        };

        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["message"], "admission requirements");
        assert_eq!(json["context"][0]["url"], "/admissions");
        assert_eq!(json["history"][0]["role"], "user");
        assert_eq!(json["session_id"], "ccb-abc-123");
    }

    #[test]
    fn test_roles_serialize_lowercase() {
        assert_eq!(serde_json::to_value(Role::User).unwrap(), "user");
        assert_eq!(serde_json::to_value(Role::Assistant).unwrap(), "assistant");
    }
}
