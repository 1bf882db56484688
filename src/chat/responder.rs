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

use crate::chat::intent::{recognize_intent, Intent};
use crate::knowledge::types::{ScoredEntry, SourceType};
use crate::text::normalize_text;

const GREETING_REPLY: &str =
    "Hi! I’m here to help with anything about City College of Bayawan. What would you like to explore?";
const THANKS_REPLY: &str = "You’re welcome! If you need anything else, just ask.";
const GOODBYE_REPLY: &str =
    "Goodbye! Take care, and come back anytime if you have more questions.";

const CLOSING_INVITATION: &str =
    "If you want, tell me exactly what detail you’re looking for and I’ll narrow it down.";

const APOLOGY_REPLY: &str =
    "Sorry, I ran into a problem while fetching a response. Please try again in a moment.";

const LATEST_WORDS: [&str; 4] = ["latest", "recent", "new", "updates"];

/// Canned reply for small talk, or None when the message needs matching.
pub fn build_quick_reply(message: &str) -> Option<&'static str> {
    match recognize_intent(message) {
        Intent::Greeting => Some(GREETING_REPLY),
        Intent::Thanks => Some(THANKS_REPLY),
        Intent::Goodbye => Some(GOODBYE_REPLY),
        Intent::Empty | Intent::Latest | Intent::General => None,
    }
}

/// Render matched entries into the local reply: an intro line picked from
/// the message's phrasing, one Markdown bullet per entry with its detail
/// and action sub-lists, and a fixed closing invitation.
pub fn build_local_response(message: &str, matches: &[ScoredEntry<'_>]) -> String {
    let lower_message = normalize_text(message);
    let wants_latest = LATEST_WORDS
        .iter()
        .any(|word| lower_message.contains(word));
    let has_dynamic = matches
        .iter()
        .any(|scored| scored.entry.entry.source_type == SourceType::Dynamic);

    let intro = if lower_message.contains("where") || lower_message.contains("find") {
        "You can find that here:"
    } else if has_dynamic && wants_latest {
        "Here are the latest updates that match your request:"
    } else if has_dynamic {
        "Here are the most relevant updates I found:"
    } else {
        "Here’s the most relevant page for your request:"
    };

    let mut lines: Vec<String> = Vec::new();
    for scored in matches {
        let entry = &scored.entry.entry;
        lines.push(format!(
            "- [{}]({}): {}",
            entry.title, entry.url, entry.summary
        ));

        let details: Vec<&String> = entry.details.iter().filter(|detail| !detail.is_empty()).collect();
        if !details.is_empty() {
            lines.push("  Details:".to_string());
            for detail in details {
                lines.push(format!("  - {detail}"));
            }
        }

        let actions: Vec<&String> = entry.actions.iter().filter(|action| !action.is_empty()).collect();
        if !actions.is_empty() {
            lines.push("  What you can do:".to_string());
            for action in actions {
                lines.push(format!("  - {action}"));
            }
        }
    }

    format!("{intro}\n\n{}\n\n{CLOSING_INVITATION}", lines.join("\n"))
}

/// Fixed, non-technical apology shown when the fallback backend fails.
pub fn format_error_response() -> &'static str {
    APOLOGY_REPLY
}
