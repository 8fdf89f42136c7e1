// Linguistic Signal
// Vocabulary richness, sentence structure, transition density and telltale phrases

use crate::models::SignalResult;
use crate::services::analysis::readability::flesch_reading_ease;
use crate::services::lexicon::{telltale_patterns, transition_res};
use crate::services::text_primitives::{
    clamp01, frequency_map, mean_std_dev, split_sentences, tokenize_words,
};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};

fn type_token_ratio(words: &[String]) -> (f64, Value) {
    if words.is_empty() {
        return (0.5, json!({"score": 0.5, "ttr": 0.0}));
    }
    let unique = words.iter().collect::<HashSet<_>>().len();
    let ttr = unique as f64 / words.len() as f64;
    let score = clamp01(1.0 - (ttr - 0.3) / 0.5);
    (score, json!({"score": score, "ttr": ttr}))
}

/// Share of unique words appearing exactly once.
fn hapax_legomena_ratio(words: &[String]) -> (f64, Value) {
    if words.is_empty() {
        return (0.5, json!({"score": 0.5, "ratio": 0.0}));
    }
    let freq = frequency_map(words);
    if freq.is_empty() {
        return (0.5, json!({"score": 0.5, "ratio": 0.0}));
    }
    let hapax = freq.values().filter(|c| **c == 1).count();
    let ratio = hapax as f64 / freq.len() as f64;
    let score = clamp01(1.0 - (ratio - 0.4) / 0.35);
    (score, json!({"score": score, "ratio": ratio}))
}

/// Length variation and opening-word diversity across sentences.
fn sentence_structure_variation(text: &str) -> (f64, Value) {
    let sentences = split_sentences(text);
    if sentences.len() < 3 {
        return (
            0.5,
            json!({"score": 0.5, "lengthCV": 0.0, "starterDiversity": 0.0}),
        );
    }

    let lengths: Vec<f64> = sentences
        .iter()
        .map(|s| tokenize_words(s).len() as f64)
        .collect();
    let (mean, std_dev) = mean_std_dev(&lengths);
    let length_cv = if mean > 0.0 { std_dev / mean } else { 0.0 };

    let starters: Vec<String> = sentences
        .iter()
        .map(|s| tokenize_words(s).into_iter().next().unwrap_or_default())
        .collect();
    let unique_starters = starters.iter().collect::<HashSet<_>>().len();
    let starter_diversity = unique_starters as f64 / starters.len() as f64;

    let length_score = clamp01(1.0 - (length_cv - 0.2) / 0.5);
    let starter_score = clamp01(1.0 - (starter_diversity - 0.3) / 0.5);

    let score = clamp01(length_score * 0.5 + starter_score * 0.5);
    (
        score,
        json!({"score": score, "lengthCV": length_cv, "starterDiversity": starter_diversity}),
    )
}

/// Flesch-Kincaid consistency across sentences.
fn readability_consistency(text: &str) -> (f64, Value) {
    let sentences = split_sentences(text);
    if sentences.len() < 3 {
        return (
            0.5,
            json!({"score": 0.5, "avgReadability": 0.0, "readabilityCV": 0.0}),
        );
    }

    let scores: Vec<f64> = sentences
        .iter()
        .map(|s| flesch_reading_ease(&tokenize_words(s), 1))
        .collect();

    let (mean, std_dev) = mean_std_dev(&scores);
    let cv = if mean != 0.0 { (std_dev / mean).abs() } else { 0.0 };
    let score = clamp01(1.0 - (cv - 0.1) / 0.6);

    (
        score,
        json!({"score": score, "avgReadability": mean, "readabilityCV": cv}),
    )
}

/// Density of stock AI transition phrases per 100 words.
fn transition_frequency(text: &str) -> (f64, Value) {
    let words = tokenize_words(text);
    if words.is_empty() {
        return (0.5, json!({"score": 0.5, "count": 0, "density": 0.0}));
    }

    let count: usize = transition_res()
        .iter()
        .map(|re| re.find_iter(text).count())
        .sum();

    let density = count as f64 / (words.len() as f64 / 100.0);
    let score = clamp01(density / 3.0);

    (score, json!({"score": score, "count": count, "density": density}))
}

/// Repeated 3-6 word phrases.
fn repetition_detection(text: &str) -> (f64, Value) {
    let words = tokenize_words(text);
    if words.len() < 20 {
        return (0.5, json!({"score": 0.5, "repeatedPhrases": 0}));
    }

    let mut phrases: HashMap<String, usize> = HashMap::new();
    for len in 3..=6 {
        if words.len() < len {
            break;
        }
        for window in words.windows(len) {
            *phrases.entry(window.join(" ")).or_insert(0) += 1;
        }
    }

    let repeated = phrases.values().filter(|c| **c >= 2).count();
    let total = phrases.len().max(1);
    let ratio = repeated as f64 / total as f64;
    let score = clamp01(ratio * 5.0);

    (score, json!({"score": score, "repeatedPhrases": repeated}))
}

/// Known machine-prose telltale patterns.
fn telltale_check(text: &str) -> (f64, Value) {
    let mut found: Vec<&str> = Vec::new();
    for pattern in telltale_patterns() {
        if pattern.is_match(text) {
            found.push(pattern.as_str());
        }
    }

    let score = clamp01(found.len() as f64 / 5.0);
    (
        score,
        json!({"score": score, "matchCount": found.len(), "patterns": found}),
    )
}

/// Combined linguistic signal.
pub fn analyze_linguistic(text: &str) -> SignalResult {
    let words = tokenize_words(text);
    let (ttr, ttr_details) = type_token_ratio(&words);
    let (hapax, hapax_details) = hapax_legomena_ratio(&words);
    let (structure, structure_details) = sentence_structure_variation(text);
    let (readability, readability_details) = readability_consistency(text);
    let (transitions, transition_details) = transition_frequency(text);
    let (repetition, repetition_details) = repetition_detection(text);
    let (telltales, telltale_details) = telltale_check(text);

    let score = clamp01(
        ttr * 0.12
            + hapax * 0.10
            + structure * 0.18
            + readability * 0.15
            + transitions * 0.15
            + repetition * 0.10
            + telltales * 0.20,
    );

    SignalResult {
        score,
        details: HashMap::from([
            ("typeTokenRatio".to_string(), ttr_details),
            ("hapaxLegomena".to_string(), hapax_details),
            ("sentenceStructure".to_string(), structure_details),
            ("readability".to_string(), readability_details),
            ("transitions".to_string(), transition_details),
            ("repetition".to_string(), repetition_details),
            ("telltalePatterns".to_string(), telltale_details),
        ]),
    }
}
