use crate::fuzzy::fuzzy_includes;
use crate::knowledge::types::{IndexedEntry, MatchOutcome, ScoredEntry};
use crate::text::{normalize_text, tokenize};

/// Entries below this score are never considered.
const ABSOLUTE_SCORE_FLOOR: f32 = 0.18;
/// Among surviving entries, keep only those within this share of the best.
const RELATIVE_SCORE_FLOOR: f32 = 0.6;
/// Overlap denominator floor; keeps one-word queries from scoring high on a
/// single token hit.
const TOKEN_COUNT_FLOOR: usize = 4;
const MAX_MATCHES: usize = 3;

const TITLE_SUBSTRING_BONUS: f32 = 0.15;
const KEYWORD_SUBSTRING_BONUS: f32 = 0.08;
const KEYWORD_FUZZY_BONUS: f32 = 0.05;

/// Score one entry against the user's tokens and normalized message.
/// Token overlap forms the base; literal title and keyword mentions add
/// fixed bonuses, capped at 1.0.
pub fn score_entry(entry: &IndexedEntry, user_tokens: &[String], normalized_message: &str) -> f32 {
    if user_tokens.is_empty() {
        return 0.0;
    }

    let overlap = user_tokens
        .iter()
        .filter(|token| entry.tokens.contains(token.as_str()))
        .count();
    let mut score = overlap as f32 / user_tokens.len().max(TOKEN_COUNT_FLOOR) as f32;

    let title_normalized = normalize_text(&entry.entry.title);
    if !title_normalized.is_empty() && normalized_message.contains(&title_normalized) {
        score += TITLE_SUBSTRING_BONUS;
    }

    for keyword in &entry.entry.keywords {
        let keyword_normalized = normalize_text(keyword);
        if !keyword_normalized.is_empty() && normalized_message.contains(&keyword_normalized) {
            score += KEYWORD_SUBSTRING_BONUS;
        }
        if fuzzy_includes(&keyword_normalized, normalized_message) {
            score += KEYWORD_FUZZY_BONUS;
        }
    }

    score.min(1.0)
}

/// Rank the index against a message. Returns the entries at or above the
/// adaptive floor `max(0.18, top * 0.6)`, at most three, best first.
/// Ties keep index order (stable sort).
pub fn match_query<'a>(index: &'a [IndexedEntry], message: &str) -> MatchOutcome<'a> {
    let normalized_message = normalize_text(message);
    let user_tokens = tokenize(message);
    if user_tokens.is_empty() {
        return MatchOutcome {
            matches: Vec::new(),
            top_score: 0.0,
            normalized_message,
        };
    }

    let mut scored: Vec<ScoredEntry<'a>> = index
        .iter()
        .map(|entry| ScoredEntry {
            entry,
            score: score_entry(entry, &user_tokens, &normalized_message),
        })
        .collect();
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let top_score = scored.first().map(|scored| scored.score).unwrap_or(0.0);
    let floor = ABSOLUTE_SCORE_FLOOR.max(top_score * RELATIVE_SCORE_FLOOR);
    let matches: Vec<ScoredEntry<'a>> = scored
        .into_iter()
        .filter(|scored| scored.score >= floor)
        .take(MAX_MATCHES)
        .collect();

    MatchOutcome {
        matches,
        top_score,
        normalized_message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::index::build_knowledge_index;
    use crate::knowledge::registry::static_entries;
    use crate::knowledge::types::{KnowledgeEntry, SourceType};

    fn test_index() -> Vec<IndexedEntry> {
        build_knowledge_index(static_entries())
    }

    #[test]
    fn test_apply_query_surfaces_admissions() {
        let index = test_index();
        let outcome = match_query(&index, "How do I apply?");

        assert!(outcome.top_score > 0.0);
        assert!(!outcome.matches.is_empty());
        assert!(outcome
            .matches
            .iter()
            .any(|scored| scored.entry.entry.id == "admissions"));
    }

    #[test]
    fn test_empty_message_short_circuits() {
        let index = test_index();
        let outcome = match_query(&index, "");
        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.top_score, 0.0);
        assert_eq!(outcome.normalized_message, "");
    }

    #[test]
    fn test_stop_word_only_message_short_circuits() {
        let index = test_index();
        let outcome = match_query(&index, "the of and with");
        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.top_score, 0.0);
    }

    #[test]
    fn test_gibberish_scores_below_floor() {
        let index = test_index();
        let outcome = match_query(&index, "asdkjhasdkjh qwpoeiqwpoei");
        assert!(outcome.matches.is_empty());
    }

    #[test]
    fn test_matches_capped_at_three() {
        let index = test_index();
        let outcome = match_query(&index, "news events announcements updates achievements");
        assert!(outcome.matches.len() <= 3);
    }

    #[test]
    fn test_matches_sorted_descending() {
        let index = test_index();
        let outcome = match_query(&index, "admission requirements and enrollment steps");
        for pair in outcome.matches.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_short_query_denominator_floor() {
        let entry = KnowledgeEntry {
            id: "one".to_string(),
            title: "Campus Library".to_string(),
            url: "/library".to_string(),
            summary: "Borrowing and study spaces.".to_string(),
            keywords: vec![],
            details: vec![],
            actions: vec![],
            extra: String::new(),
            source_type: SourceType::Static,
        };
        let index = build_knowledge_index(vec![entry]);

        // One overlapping token out of a one-token query: 1 / max(1, 4).
        let tokens = vec!["library".to_string()];
        let score = score_entry(&index[0], &tokens, "library");
        assert!((score - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_title_substring_bonus() {
        let index = test_index();
        let admissions = index
            .iter()
            .find(|indexed| indexed.entry.id == "admissions")
            .unwrap();

        let tokens = tokenize("tell me about admissions today please");
        let with_title = score_entry(admissions, &tokens, "tell me about admissions today please");
        let without_title = score_entry(admissions, &tokens, "tell me someting else entirely ok");
        assert!(with_title > without_title);
    }

    #[test]
    fn test_score_clamped_at_one() {
        let index = test_index();
        let news = index
            .iter()
            .find(|indexed| indexed.entry.id == "news")
            .unwrap();
        let message = "news events announcements updates achievements latest recent campus news";
        let tokens = tokenize(message);
        let score = score_entry(news, &tokens, &normalize_text(message));
        assert!(score <= 1.0);
    }

    #[test]
    fn test_empty_tokens_score_zero() {
        let index = test_index();
        assert_eq!(score_entry(&index[0], &[], "anything"), 0.0);
    }
}
