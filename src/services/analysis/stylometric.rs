// Stylometric Signal
// Punctuation habits, function-word distribution, Yule's K and word lengths

use crate::models::SignalResult;
use crate::services::lexicon::function_words;
use crate::services::text_primitives::{clamp01, frequency_map, mean_std_dev, tokenize_words};
use serde_json::{json, Value};
use std::collections::HashMap;

const PUNCTUATION_TYPES: &[&str] = &[
    ";", ":", "—", "–", "...", "(", ")", "\"", "'", "!", "?", ",", ".",
];

/// Variety of punctuation in use. Machine prose sticks to the safe marks.
fn punctuation_diversity(text: &str) -> (f64, Value) {
    let found = PUNCTUATION_TYPES
        .iter()
        .filter(|p| text.contains(*p))
        .count();

    let diversity = found as f64 / PUNCTUATION_TYPES.len() as f64;
    let score = clamp01(1.0 - (diversity - 0.15) / 0.55);

    (score, json!({"score": score, "diversity": diversity, "typesFound": found}))
}

/// Ratio and spread of function words. Machine text runs function-word
/// heavy with an even distribution.
fn function_word_distribution(text: &str) -> (f64, Value) {
    let words = tokenize_words(text);
    if words.len() < 20 {
        return (0.5, json!({"score": 0.5, "ratio": 0.0, "cv": 0.0}));
    }

    let freq = frequency_map(&words);
    let mut counts: Vec<f64> = Vec::new();
    let mut total_function_words = 0usize;

    for fw in function_words() {
        if let Some(count) = freq.get(*fw) {
            counts.push(*count as f64);
            total_function_words += count;
        }
    }

    let ratio = total_function_words as f64 / words.len() as f64;
    let (mean, std_dev) = mean_std_dev(&counts);
    let cv = if mean > 0.0 { std_dev / mean } else { 0.0 };

    let ratio_score = clamp01((ratio - 0.35) / 0.25);
    let cv_score = clamp01(1.0 - (cv - 0.5) / 1.5);

    let score = clamp01(ratio_score * 0.5 + cv_score * 0.5);
    (score, json!({"score": score, "ratio": ratio, "cv": cv}))
}

/// Yule's K. Lower K means richer vocabulary, which reads more machine-like
/// on this scale than the repetitive high-K human register.
fn yules_k(text: &str) -> (f64, Value) {
    let words = tokenize_words(text);
    if words.len() < 20 {
        return (0.5, json!({"score": 0.5, "k": 0.0}));
    }

    let freq = frequency_map(&words);
    let n = words.len() as f64;

    let mut freq_of_freq: HashMap<usize, usize> = HashMap::new();
    for count in freq.values() {
        *freq_of_freq.entry(*count).or_insert(0) += 1;
    }

    let sum_i2_vi: f64 = freq_of_freq
        .iter()
        .map(|(i, vi)| (i * i * vi) as f64)
        .sum();

    let k = 10_000.0 * (sum_i2_vi - n) / (n * n);
    let score = clamp01(1.0 - (k - 50.0) / 150.0);

    (score, json!({"score": score, "k": k}))
}

/// Spread of word lengths.
fn word_length_distribution(text: &str) -> (f64, Value) {
    let words = tokenize_words(text);
    if words.len() < 20 {
        return (0.5, json!({"score": 0.5, "avgLength": 0.0, "cv": 0.0}));
    }

    let lengths: Vec<f64> = words.iter().map(|w| w.len() as f64).collect();
    let (mean, std_dev) = mean_std_dev(&lengths);
    let cv = if mean > 0.0 { std_dev / mean } else { 0.0 };

    let score = clamp01(1.0 - (cv - 0.35) / 0.35);

    (score, json!({"score": score, "avgLength": mean, "cv": cv}))
}

/// Combined stylometric signal.
pub fn analyze_stylometric(text: &str) -> SignalResult {
    let (punctuation, punctuation_details) = punctuation_diversity(text);
    let (function_dist, function_details) = function_word_distribution(text);
    let (yules, yules_details) = yules_k(text);
    let (word_length, word_length_details) = word_length_distribution(text);

    let score = clamp01(
        punctuation * 0.25 + function_dist * 0.25 + yules * 0.25 + word_length * 0.25,
    );

    SignalResult {
        score,
        details: HashMap::from([
            ("punctuation".to_string(), punctuation_details),
            ("functionWords".to_string(), function_details),
            ("yulesK".to_string(), yules_details),
            ("wordLength".to_string(), word_length_details),
        ]),
    }
}
