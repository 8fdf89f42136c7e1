// Readability Forensics Signal
// Cross-chunk variance of Flesch-Kincaid, Gunning Fog and Coleman-Liau

use crate::models::SignalResult;
use crate::services::text_primitives::{
    clamp01, count_syllables, mean_std_dev, split_paragraphs, split_sentences, tokenize_words,
};
use serde_json::json;
use std::collections::HashMap;

/// Flesch-Kincaid Reading Ease. Neutral 50 for empty input.
pub(crate) fn flesch_reading_ease(words: &[String], sentence_count: usize) -> f64 {
    if words.is_empty() || sentence_count == 0 {
        return 50.0;
    }
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
    206.835 - 1.015 * (words.len() as f64 / sentence_count as f64)
        - 84.6 * (syllables as f64 / words.len() as f64)
}

/// Gunning Fog Index. Neutral 10 for empty input.
fn gunning_fog(words: &[String], sentence_count: usize) -> f64 {
    if words.is_empty() || sentence_count == 0 {
        return 10.0;
    }
    let complex = words.iter().filter(|w| count_syllables(w) >= 3).count();
    0.4 * (words.len() as f64 / sentence_count as f64
        + 100.0 * (complex as f64 / words.len() as f64))
}

/// Coleman-Liau Index. Neutral 10 for empty input.
fn coleman_liau(text: &str, words: &[String], sentence_count: usize) -> f64 {
    if words.is_empty() || sentence_count == 0 {
        return 10.0;
    }
    let letters = text.chars().filter(|c| c.is_ascii_alphabetic()).count();
    let l = (letters as f64 / words.len() as f64) * 100.0;
    let s = (sentence_count as f64 / words.len() as f64) * 100.0;
    0.0588 * l - 0.296 * s - 15.8
}

/// Paragraphs when there are enough, sentence triples otherwise.
fn chunk_text(text: &str) -> Vec<String> {
    let paragraphs: Vec<String> = split_paragraphs(text)
        .into_iter()
        .filter(|p| p.trim().len() > 30)
        .map(|p| p.to_string())
        .collect();
    if paragraphs.len() >= 3 {
        return paragraphs;
    }

    let sentences = split_sentences(text);
    if sentences.len() < 6 {
        if sentences.len() >= 2 {
            return sentences;
        }
        return vec![text.to_string()];
    }

    sentences
        .chunks(3)
        .map(|group| group.join(" "))
        .filter(|chunk| !chunk.trim().is_empty())
        .collect()
}

fn variance_of<F>(chunks: &[String], metric: F) -> (f64, f64)
where
    F: Fn(&str) -> f64,
{
    let scores: Vec<f64> = chunks.iter().map(|c| metric(c)).collect();
    let (mean, std_dev) = mean_std_dev(&scores);
    let cv = if mean != 0.0 { (std_dev / mean).abs() } else { 0.0 };
    (mean, cv)
}

/// Combined readability-variance signal. Uniform readability across
/// chunks is the machine tell; humans drift.
pub fn analyze_readability_forensics(text: &str) -> SignalResult {
    let chunks = chunk_text(text);

    if chunks.len() < 2 {
        return SignalResult {
            score: 0.5,
            details: HashMap::from([
                ("fleschKincaid".to_string(), json!({"score": 0.5, "mean": 0.0, "cv": 0.0})),
                ("gunningFog".to_string(), json!({"score": 0.5, "mean": 0.0, "cv": 0.0})),
                ("colemanLiau".to_string(), json!({"score": 0.5, "mean": 0.0, "cv": 0.0})),
            ]),
        };
    }

    let (fk_mean, fk_cv) = variance_of(&chunks, |chunk| {
        let words = tokenize_words(chunk);
        let sentences = split_sentences(chunk);
        flesch_reading_ease(&words, sentences.len().max(1))
    });

    let (gf_mean, gf_cv) = variance_of(&chunks, |chunk| {
        let words = tokenize_words(chunk);
        let sentences = split_sentences(chunk);
        gunning_fog(&words, sentences.len().max(1))
    });

    let (cl_mean, cl_cv) = variance_of(&chunks, |chunk| {
        let words = tokenize_words(chunk);
        let sentences = split_sentences(chunk);
        coleman_liau(chunk, &words, sentences.len().max(1))
    });

    let fk_score = clamp01(1.0 - (fk_cv - 0.05) / 0.4);
    let gf_score = clamp01(1.0 - (gf_cv - 0.05) / 0.4);
    let cl_score = clamp01(1.0 - (cl_cv - 0.05) / 0.4);

    let score = clamp01(fk_score * 0.40 + gf_score * 0.30 + cl_score * 0.30);

    SignalResult {
        score,
        details: HashMap::from([
            ("fleschKincaid".to_string(), json!({"score": fk_score, "mean": fk_mean, "cv": fk_cv})),
            ("gunningFog".to_string(), json!({"score": gf_score, "mean": gf_mean, "cv": gf_cv})),
            ("colemanLiau".to_string(), json!({"score": cl_score, "mean": cl_mean, "cv": cl_cv})),
        ]),
    }
}
