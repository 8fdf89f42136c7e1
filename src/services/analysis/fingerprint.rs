// Fingerprint Signal
// Known AI phrases, structural patterns and boilerplate openings/closings

use crate::models::SignalResult;
use crate::services::lexicon::{
    fingerprint_closing, fingerprint_opening, fingerprint_patterns, FINGERPRINT_PHRASES,
};
use crate::services::text_primitives::{char_tail, clamp01, tokenize_words};
use serde_json::{json, Value};
use std::collections::HashMap;

/// Substring matches against the known-phrase list.
fn phrase_matching(text: &str) -> (f64, Value) {
    let lower = text.to_lowercase();
    let word_count = tokenize_words(text).len();

    let found: Vec<&str> = FINGERPRINT_PHRASES
        .iter()
        .filter(|phrase| lower.contains(*phrase))
        .copied()
        .collect();

    let density = if word_count > 0 {
        found.len() as f64 / (word_count as f64 / 100.0)
    } else {
        0.0
    };
    // Even 2-3 matches per 100 words is significant
    let score = clamp01(density / 2.5);

    let shown: Vec<&str> = found.iter().take(10).copied().collect();
    (
        score,
        json!({"score": score, "matches": found.len(), "density": density, "found": shown}),
    )
}

/// Total regex hits per 100 words.
fn pattern_matching(text: &str) -> (f64, Value) {
    let total: usize = fingerprint_patterns()
        .iter()
        .map(|re| re.find_iter(text).count())
        .sum();

    let word_count = tokenize_words(text).len();
    let density = if word_count > 0 {
        total as f64 / (word_count as f64 / 100.0)
    } else {
        0.0
    };
    let score = clamp01(density / 3.0);

    (score, json!({"score": score, "matches": total, "density": density}))
}

/// Boilerplate opening and closing detection. Either alone is a strong
/// signal; both together nearly conclusive.
fn structural_patterns(text: &str) -> (f64, Value) {
    let trimmed = text.trim();

    let opening = fingerprint_opening().iter().any(|re| re.is_match(trimmed));

    let tail = char_tail(trimmed, 300);
    let closing = fingerprint_closing().iter().any(|re| re.is_match(tail));

    let mut score = 0.0;
    if opening {
        score += 0.4;
    }
    if closing {
        score += 0.4;
    }
    if opening && closing {
        score += 0.2;
    }

    (
        clamp01(score),
        json!({"score": clamp01(score), "opening": opening, "closing": closing}),
    )
}

/// Combined fingerprint signal.
pub fn analyze_fingerprint(text: &str) -> SignalResult {
    let (phrases, phrase_details) = phrase_matching(text);
    let (patterns, pattern_details) = pattern_matching(text);
    let (structural, structural_details) = structural_patterns(text);

    let score = clamp01(phrases * 0.40 + patterns * 0.35 + structural * 0.25);

    SignalResult {
        score,
        details: HashMap::from([
            ("phrases".to_string(), phrase_details),
            ("patterns".to_string(), pattern_details),
            ("structural".to_string(), structural_details),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_phrases_detected() {
        let text = "In the realm of software, a paradigm shift requires a holistic approach and seamless integration throughout.";
        let result = analyze_fingerprint(text);
        assert!(result.details["phrases"]["matches"].as_u64().unwrap() >= 3);
        assert!(result.score > 0.3);
    }

    #[test]
    fn test_opening_and_closing_stack() {
        let text = "In today's rapidly changing market, firms adapt or vanish. Margins compress every quarter without mercy. In conclusion, adaptation is survival.";
        let result = analyze_fingerprint(text);
        let structural = &result.details["structural"];
        assert!(structural["opening"].as_bool().unwrap());
        assert!(structural["closing"].as_bool().unwrap());
        assert_eq!(structural["score"].as_f64().unwrap(), 1.0);
    }

    #[test]
    fn test_clean_text_scores_low() {
        let text = "Rust fills the gap between C and higher-level languages. The borrow checker annoys newcomers for a month, then quietly saves them for years.";
        let result = analyze_fingerprint(text);
        assert!(result.score < 0.2, "score={}", result.score);
    }

    #[test]
    fn test_empty_text() {
        let result = analyze_fingerprint("");
        assert!((0.0..=1.0).contains(&result.score));
        assert_eq!(result.details["phrases"]["matches"].as_u64().unwrap(), 0);
    }

    #[test]
    fn test_found_list_capped_at_ten() {
        let text = FINGERPRINT_PHRASES.join(". ");
        let result = analyze_fingerprint(&text);
        let found = result.details["phrases"]["found"].as_array().unwrap();
        assert_eq!(found.len(), 10);
    }
}
