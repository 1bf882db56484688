use std::collections::HashSet;

use crate::knowledge::types::{ContextItem, IndexedEntry, KnowledgeEntry, ScoredEntry};
use crate::text::tokenize;

/// Text basis for tokenization: title, summary, keywords, details, actions,
/// extra, space-separated in that order.
pub fn build_entry_text(entry: &KnowledgeEntry) -> String {
    format!(
        "{} {} {} {} {} {}",
        entry.title,
        entry.summary,
        entry.keywords.join(" "),
        entry.details.join(" "),
        entry.actions.join(" "),
        entry.extra
    )
}

/// Attach a derived token set to every entry. Pure: consumes the entry list
/// and produces fresh indexed entries. Re-run whenever the entry list
/// changes; the index is replaced wholesale, never patched.
pub fn build_knowledge_index(entries: Vec<KnowledgeEntry>) -> Vec<IndexedEntry> {
    entries
        .into_iter()
        .map(|entry| {
            let tokens: HashSet<String> = tokenize(&build_entry_text(&entry)).into_iter().collect();
            IndexedEntry { entry, tokens }
        })
        .collect()
}

/// Project matches down to the triples forwarded to the fallback backend.
pub fn build_context_items(matches: &[ScoredEntry<'_>]) -> Vec<ContextItem> {
    matches
        .iter()
        .map(|scored| ContextItem {
            title: scored.entry.entry.title.clone(),
            url: scored.entry.entry.url.clone(),
            summary: scored.entry.entry.summary.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::registry::static_entries;

    #[test]
    fn test_entry_text_covers_all_fields() {
        let entry = static_entries()
            .into_iter()
            .find(|entry| entry.id == "admissions")
            .unwrap();
        let text = build_entry_text(&entry);
        assert!(text.contains("Admissions"));
        assert!(text.contains("apply"));
        assert!(text.contains("Enrollment process steps"));
        assert!(text.contains("Choose your applicant category tab"));
    }

    #[test]
    fn test_index_derives_tokens() {
        let index = build_knowledge_index(static_entries());
        let admissions = index
            .iter()
            .find(|indexed| indexed.entry.id == "admissions")
            .unwrap();
        assert!(admissions.tokens.contains("apply"));
        assert!(admissions.tokens.contains("enrollment"));
        assert!(!admissions.tokens.contains("the"));
    }

    #[test]
    fn test_context_items_leak_nothing_extra() {
        let index = build_knowledge_index(static_entries());
        let matches: Vec<ScoredEntry> = index
            .iter()
            .take(2)
            .map(|entry| ScoredEntry { entry, score: 0.5 })
            .collect();
        let context = build_context_items(&matches);

        assert_eq!(context.len(), 2);
        assert_eq!(context[0].title, index[0].entry.title);
        assert_eq!(context[0].url, index[0].entry.url);
        assert_eq!(context[0].summary, index[0].entry.summary);
    }
}
