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

use std::collections::HashMap;

use crate::text::normalize_text;

/// Similarity floor for treating a near-miss keyword as contained.
pub const FUZZY_INCLUDES_THRESHOLD: f32 = 0.82;

/// Character bigrams of the normalized input. Inputs shorter than two
/// characters yield a single element holding the normalized string itself.
pub fn build_bigrams(value: &str) -> Vec<String> {
    let normalized = normalize_text(value);
    let chars: Vec<char> = normalized.chars().collect();
    if chars.len() < 2 {
        return vec![normalized];
    }

    chars
        .windows(2)
        .map(|pair| pair.iter().collect())
        .collect()
}

/// Dice similarity coefficient over character bigram multisets.
/// Each bigram instance on the right side satisfies at most one match.
pub fn dice_coefficient(a: &str, b: &str) -> f32 {
    let a_bigrams = build_bigrams(a);
    let b_bigrams = build_bigrams(b);
    if a_bigrams.is_empty() || b_bigrams.is_empty() {
        return 0.0;
    }

    let mut b_counts: HashMap<&str, usize> = HashMap::new();
    for bigram in &b_bigrams {
        *b_counts.entry(bigram.as_str()).or_insert(0) += 1;
    }

    let mut matches = 0usize;
    for bigram in &a_bigrams {
        if let Some(count) = b_counts.get_mut(bigram.as_str()) {
            if *count > 0 {
                matches += 1;
                *count -= 1;
            }
        }
    }

    (2 * matches) as f32 / (a_bigrams.len() + b_bigrams.len()) as f32
}

/// Approximate containment: literal substring after normalization, or a
/// bigram similarity at or above `FUZZY_INCLUDES_THRESHOLD`.
pub fn fuzzy_includes(needle: &str, haystack: &str) -> bool {
    let normalized_needle = normalize_text(needle);
    let normalized_haystack = normalize_text(haystack);
    if normalized_needle.is_empty() || normalized_haystack.is_empty() {
        return false;
    }
    if normalized_haystack.contains(&normalized_needle) {
        return true;
    }
    dice_coefficient(&normalized_needle, &normalized_haystack) >= FUZZY_INCLUDES_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bigrams_of_short_input() {
        assert_eq!(build_bigrams("a"), vec!["a"]);
        assert_eq!(build_bigrams(""), vec![""]);
    }

    #[test]
    fn test_bigrams_slide_over_normalized_text() {
        assert_eq!(build_bigrams("News!"), vec!["ne", "ew", "ws"]);
    }

    #[test]
    fn test_dice_identity_and_symmetry() {
        assert_eq!(dice_coefficient("program", "program"), 1.0);
        let forward = dice_coefficient("night", "nacht");
        let backward = dice_coefficient("nacht", "night");
        assert_eq!(forward, backward);
        assert!(forward > 0.0 && forward < 1.0);
    }

    #[test]
    fn test_dice_empty_side_scores_zero() {
        assert_eq!(dice_coefficient("", "x"), 0.0);
        assert_eq!(dice_coefficient("x", ""), 0.0);
    }

    #[test]
    fn test_fuzzy_includes_substring_fast_path() {
        assert!(fuzzy_includes("program", "Our academic programs are great"));
    }

    #[test]
    fn test_fuzzy_includes_near_miss() {
        assert!(fuzzy_includes("admission requirements", "admissions requirement"));
        assert!(!fuzzy_includes("library", "cafeteria menu"));
    }

    #[test]
    fn test_fuzzy_includes_empty_inputs() {
        assert!(!fuzzy_includes("", "anything"));
        assert!(!fuzzy_includes("anything", ""));
    }
}
