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

use std::collections::HashSet;

use crate::text::{normalize_text, tokenize};

/// Small-talk classification of one user message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Empty,
    Greeting,
    Thanks,
    Goodbye,
    Latest,
    General,
}

/// Classify a message. Checks run in a fixed priority order and the first
/// match wins: empty, greeting, thanks, goodbye, latest, general.
pub fn recognize_intent(message: &str) -> Intent {
    let normalized = normalize_text(message);
    if normalized.is_empty() {
        return Intent::Empty;
    }

    let tokens: HashSet<String> = tokenize(&normalized).into_iter().collect();
    let has_token = |token: &str| tokens.contains(token);
    let has_phrase = |phrase: &str| normalized.contains(phrase);

    if has_token("hello")
        || has_token("hi")
        || has_token("hey")
        || has_phrase("good morning")
        || has_phrase("good afternoon")
        || has_phrase("good evening")
    {
        return Intent::Greeting;
    }
    if has_token("thank") || has_token("thanks") || has_phrase("appreciate") {
        return Intent::Thanks;
    }
    if has_token("bye") || has_token("goodbye") || has_phrase("see you") {
        return Intent::Goodbye;
    }
    if has_token("latest") || has_token("recent") || has_token("new") || has_token("updates") {
        return Intent::Latest;
    }

    Intent::General
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_message() {
        assert_eq!(recognize_intent(""), Intent::Empty);
        assert_eq!(recognize_intent("?!?"), Intent::Empty);
    }

    #[test]
    fn test_greetings() {
        assert_eq!(recognize_intent("hello"), Intent::Greeting);
        assert_eq!(recognize_intent("Hi there!"), Intent::Greeting);
        assert_eq!(recognize_intent("good morning po"), Intent::Greeting);
    }

    #[test]
    fn test_thanks_and_goodbye() {
        assert_eq!(recognize_intent("thanks a lot"), Intent::Thanks);
        assert_eq!(recognize_intent("I appreciate it"), Intent::Thanks);
        assert_eq!(recognize_intent("bye!"), Intent::Goodbye);
        assert_eq!(recognize_intent("see you tomorrow"), Intent::Goodbye);
    }

    #[test]
    fn test_latest() {
        assert_eq!(recognize_intent("any recent announcements"), Intent::Latest);
        assert_eq!(recognize_intent("show me updates"), Intent::Latest);
    }

    #[test]
    fn test_priority_order_first_match_wins() {
        // Greeting outranks latest even when both signals are present.
        assert_eq!(recognize_intent("hello, any latest news?"), Intent::Greeting);
        // Thanks outranks goodbye.
        assert_eq!(recognize_intent("thanks, bye"), Intent::Thanks);
    }

    #[test]
    fn test_general_fallthrough() {
        assert_eq!(recognize_intent("where is the library"), Intent::General);
    }
}
