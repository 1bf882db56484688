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

use futures::future::join_all;
use tracing::{error, info, warn};

use crate::chat::backend::{BackendQuery, ChatBackend, HistoryItem, Role};
use crate::chat::responder::{build_local_response, build_quick_reply, format_error_response};
use crate::chat::session::SessionManager;
use crate::chat::types::{ConversationMessage, Sender};
use crate::config::Config;
use crate::knowledge::extractor::extract_entries;
use crate::knowledge::index::{build_context_items, build_knowledge_index};
use crate::knowledge::matcher::match_query;
use crate::knowledge::registry;
use crate::knowledge::site_api::SiteContent;
use crate::knowledge::types::{IndexedEntry, KnowledgeEntry};

const WELCOME_MESSAGE: &str =
    "Hello! I'm here to help you with questions about City College of Bayawan. How can I assist you today?";

fn welcome_message() -> ConversationMessage {
    ConversationMessage::bot(WELCOME_MESSAGE)
}

/// Outcome of loading one dynamic source
#[derive(Debug)]
pub struct SourceLoadReport {
    pub id: &'static str,
    pub title: &'static str,
    pub entries: usize,
    pub error: Option<String>,
}

/// Wires the knowledge index, matcher, responder, session manager and
/// fallback backend into one request/response cycle per chat instance.
pub struct ChatEngine {
    config: Config,
    backend: Arc<dyn ChatBackend>,
    session: SessionManager,
    static_entries: Vec<KnowledgeEntry>,
    dynamic_entries: Vec<KnowledgeEntry>,
    index: Vec<IndexedEntry>,
    messages: Vec<ConversationMessage>,
    typing: bool,
}

impl ChatEngine {
    /// Restore the persisted conversation (or seed the welcome message) and
    /// index the static entries. Dynamic knowledge arrives separately via
    /// `load_knowledge`.
    pub fn new(config: Config, backend: Arc<dyn ChatBackend>, session: SessionManager) -> Self {
        let messages = session.load_messages(vec![welcome_message()]);
        let static_entries = registry::static_entries();
        let index = build_knowledge_index(static_entries.clone());

        Self {
            config,
            backend,
            session,
            static_entries,
            dynamic_entries: Vec::new(),
            index,
            messages,
            typing: false,
        }
    }

    /// Fetch every dynamic source concurrently, keep the successes, and
    /// replace the dynamic half of the index. A slow or failing source only
    /// costs its own entries.
    pub async fn load_knowledge(&mut self, api: &dyn SiteContent) -> Vec<SourceLoadReport> {
        let sources = registry::dynamic_sources();
        let limit = self.config.knowledge.entry_limit;

        let fetches = sources.iter().map(|source| async move {
            match api.fetch(source.endpoint).await {
                Ok(data) => Ok(extract_entries(source, &data, limit)),
                Err(error) => Err(error),
            }
        });
        let results = join_all(fetches).await;

        let mut reports = Vec::with_capacity(sources.len());
        let mut entries = Vec::new();
        for (source, result) in sources.iter().zip(results) {
            match result {
                Ok(extracted) => {
                    reports.push(SourceLoadReport {
                        id: source.id,
                        title: source.title,
                        entries: extracted.len(),
                        error: None,
                    });
                    entries.extend(extracted);
                }
                Err(error) => {
                    warn!(source = source.id, %error, "failed to load dynamic source");
                    reports.push(SourceLoadReport {
                        id: source.id,
                        title: source.title,
                        entries: 0,
                        error: Some(error.to_string()),
                    });
                }
            }
        }

        info!(
            sources = sources.len(),
            entries = entries.len(),
            "dynamic knowledge loaded"
        );
        self.dynamic_entries = entries;
        self.rebuild_index();
        reports
    }

    /// Full replace: static entries plus the current dynamic set.
    fn rebuild_index(&mut self) {
        let mut entries = self.static_entries.clone();
        entries.extend(self.dynamic_entries.clone());
        self.index = build_knowledge_index(entries);
    }

    /// Handle one user message and return the bot reply. No-op (None) on
    /// blank input or while a previous send is still in flight. Never
    /// errors: backend failures surface as the fixed apology.
    pub async fn send_message(&mut self, text: &str) -> Option<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.typing {
            return None;
        }

        self.push_message(ConversationMessage::user(trimmed));
        self.typing = true;

        let reply = self.respond(trimmed).await;
        self.push_message(ConversationMessage::bot(reply.clone()));

        self.typing = false;
        Some(reply)
    }

    async fn respond(&self, message: &str) -> String {
        if let Some(quick_reply) = build_quick_reply(message) {
            return quick_reply.to_string();
        }

        let outcome = match_query(&self.index, message);
        let has_site_intent = self.static_entries.iter().any(|entry| {
            entry
                .keywords
                .iter()
                .any(|keyword| outcome.normalized_message.contains(keyword.as_str()))
        });

        let should_answer_locally = outcome.top_score >= self.config.chat.local_threshold
            || (has_site_intent && outcome.top_score >= self.config.chat.soft_threshold);

        if should_answer_locally && !outcome.matches.is_empty() {
            return build_local_response(message, &outcome.matches);
        }

        let history = self.history_payload();
        let query = BackendQuery {
            message: message.to_string(),
            context: build_context_items(&outcome.matches),
            history,
            session_id: self.session.get_or_create_session_id(),
        };

        match self.backend.send_query(&query).await {
            Ok(reply) => reply,
            Err(error) => {
                error!(%error, "chatbot backend request failed");
                format_error_response().to_string()
            }
        }
    }

    /// Trailing window of the conversation, mapped to backend roles.
    fn history_payload(&self) -> Vec<HistoryItem> {
        let window = self.config.chat.history_window;
        let start = self.messages.len().saturating_sub(window);
        self.messages[start..]
            .iter()
            .map(|message| HistoryItem {
                role: match message.sender {
                    Sender::User => Role::User,
                    Sender::Bot => Role::Assistant,
                },
                content: message.text.clone(),
            })
            .collect()
    }

    fn push_message(&mut self, message: ConversationMessage) {
        self.messages.push(message);
        self.session.save_messages(&self.messages);
    }

    /// Replace the conversation with a fresh welcome message, in memory
    /// only. Leaves the session id untouched; persistence resumes with the
    /// next send.
    pub fn reset_conversation(&mut self) {
        self.messages = vec![welcome_message()];
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn dynamic_entry_count(&self) -> usize {
        self.dynamic_entries.len()
    }
}
