// Coherence Signal
// Topic consistency, paragraph regularity and semantic density evenness

use crate::models::SignalResult;
use crate::services::text_primitives::{
    clamp01, frequency_map, mean_std_dev, split_paragraphs, split_sentences, tokenize_words,
};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};

/// Bag-of-words cosine similarity.
fn cosine_similarity(words_a: &[String], words_b: &[String]) -> f64 {
    let freq_a = frequency_map(words_a);
    let freq_b = frequency_map(words_b);
    let all_keys: HashSet<&String> = freq_a.keys().chain(freq_b.keys()).collect();

    let mut dot = 0.0;
    let mut mag_a = 0.0;
    let mut mag_b = 0.0;

    for key in all_keys {
        let a = freq_a.get(key).copied().unwrap_or(0) as f64;
        let b = freq_b.get(key).copied().unwrap_or(0) as f64;
        dot += a * b;
        mag_a += a * a;
        mag_b += b * b;
    }

    let mag = mag_a.sqrt() * mag_b.sqrt();
    if mag > 0.0 {
        dot / mag
    } else {
        0.0
    }
}

fn topic_score(chunks: &[String]) -> (f64, Value) {
    let chunk_words: Vec<Vec<String>> = chunks.iter().map(|c| tokenize_words(c)).collect();
    let similarities: Vec<f64> = chunk_words
        .windows(2)
        .map(|pair| cosine_similarity(&pair[0], &pair[1]))
        .collect();

    let (mean, std_dev) = mean_std_dev(&similarities);
    let cv = if mean > 0.0 { std_dev / mean } else { 0.0 };

    // Machine text: high similarity between adjacent chunks, low variation
    let mean_score = clamp01((mean - 0.1) / 0.4);
    let cv_score = clamp01(1.0 - (cv - 0.1) / 0.5);

    let score = clamp01(mean_score * 0.5 + cv_score * 0.5);
    (score, json!({"score": score, "avgSimilarity": mean, "cv": cv}))
}

/// Adjacent-chunk topic similarity, over paragraphs when available.
fn topic_consistency(text: &str) -> (f64, Value) {
    let gate = || (0.5, json!({"score": 0.5, "avgSimilarity": 0.0, "cv": 0.0}));

    let paragraphs: Vec<String> = split_paragraphs(text)
        .into_iter()
        .filter(|p| p.trim().len() > 20)
        .map(|p| p.to_string())
        .collect();
    if paragraphs.len() < 2 {
        let sentences = split_sentences(text);
        if sentences.len() < 4 {
            return gate();
        }

        let chunks: Vec<String> = sentences.chunks(3).map(|g| g.join(" ")).collect();
        if chunks.len() < 2 {
            return gate();
        }

        return topic_score(&chunks);
    }

    topic_score(&paragraphs)
}

/// Paragraph (or sentence) length regularity.
fn paragraph_regularity(text: &str) -> (f64, Value) {
    let paragraphs: Vec<&str> = split_paragraphs(text)
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect();

    if paragraphs.len() < 2 {
        let sentences = split_sentences(text);
        if sentences.len() < 4 {
            return (0.5, json!({"score": 0.5, "lengthCV": 0.0}));
        }
        let lengths: Vec<f64> = sentences
            .iter()
            .map(|s| tokenize_words(s).len() as f64)
            .collect();
        let (mean, std_dev) = mean_std_dev(&lengths);
        let cv = if mean > 0.0 { std_dev / mean } else { 0.0 };
        let score = clamp01(1.0 - (cv - 0.2) / 0.5);
        return (score, json!({"score": score, "lengthCV": cv}));
    }

    let lengths: Vec<f64> = paragraphs
        .iter()
        .map(|p| tokenize_words(p).len() as f64)
        .collect();
    let (mean, std_dev) = mean_std_dev(&lengths);
    let cv = if mean > 0.0 { std_dev / mean } else { 0.0 };

    let score = clamp01(1.0 - (cv - 0.15) / 0.5);
    (score, json!({"score": score, "lengthCV": cv}))
}

/// Evenness of unique-word density per sentence.
fn semantic_density(text: &str) -> (f64, Value) {
    let sentences = split_sentences(text);
    if sentences.len() < 3 {
        return (0.5, json!({"score": 0.5, "densityCV": 0.0}));
    }

    let densities: Vec<f64> = sentences
        .iter()
        .map(|s| {
            let words = tokenize_words(s);
            if words.is_empty() {
                return 0.0;
            }
            let unique = words.iter().collect::<HashSet<_>>().len();
            unique as f64 / words.len() as f64
        })
        .collect();

    let (mean, std_dev) = mean_std_dev(&densities);
    let cv = if mean > 0.0 { std_dev / mean } else { 0.0 };

    let score = clamp01(1.0 - (cv - 0.05) / 0.3);
    (score, json!({"score": score, "densityCV": cv}))
}

/// Combined coherence signal.
pub fn analyze_coherence(text: &str) -> SignalResult {
    let (topic, topic_details) = topic_consistency(text);
    let (structure, structure_details) = paragraph_regularity(text);
    let (density, density_details) = semantic_density(text);

    let score = clamp01(topic * 0.40 + structure * 0.30 + density * 0.30);

    SignalResult {
        score,
        details: HashMap::from([
            ("topicConsistency".to_string(), topic_details),
            ("paragraphRegularity".to_string(), structure_details),
            ("semanticDensity".to_string(), density_details),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_bounds() {
        let a = tokenize_words("the cat sat on the mat");
        let b = tokenize_words("the cat sat on the mat");
        let c = tokenize_words("quantum flux harmonics resonate");
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-9);
        assert_eq!(cosine_similarity(&a, &c), 0.0);
        assert_eq!(cosine_similarity(&[], &a), 0.0);
    }

    #[test]
    fn test_short_text_gates_to_half() {
        let result = analyze_coherence("Too little here. Really.");
        assert!((result.score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_consistent_paragraphs_score_higher() {
        let consistent = "The database stores customer records and handles customer queries every day.\n\nThe database indexes customer records and serves customer queries very fast.\n\nThe database backs up customer records and logs customer queries each night.";
        let drifting = "The hike started badly, with rain soaking everything we owned in minutes.\n\nMy sister collects antique spoons from flea markets across three different countries.\n\nQuarterly earnings at the firm missed every projection the analysts had published.";
        let hi = analyze_coherence(consistent).score;
        let lo = analyze_coherence(drifting).score;
        assert!(hi > lo, "consistent={} drifting={}", hi, lo);
    }

    #[test]
    fn test_sentence_fallback_without_paragraphs() {
        let text = "The model learns patterns from data. The model applies patterns to input. The model outputs patterns as text. The model repeats patterns on demand. The model refines patterns over time. The model stores patterns internally.";
        let result = analyze_coherence(text);
        assert!((0.0..=1.0).contains(&result.score));
        assert!(result.details["topicConsistency"]["avgSimilarity"].as_f64().unwrap() > 0.0);
    }
}
