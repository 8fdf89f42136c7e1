// Sentence-Level Signal
// Scores each sentence against document-level statistics, plus
// cross-sentence coherence

use crate::models::{SentenceScore, SignalResult};
use crate::services::analysis::readability::flesch_reading_ease;
use crate::services::text_primitives::{
    clamp01, frequency_map, mean_std_dev, shannon_entropy, split_sentences, tokenize_words,
};
use serde_json::json;
use std::collections::{HashMap, HashSet};

/// AI-likelihood of one sentence given whole-document word frequencies.
fn score_sentence(sentence: &str, global_freq: &HashMap<String, usize>, global_total: f64) -> f64 {
    let words = tokenize_words(sentence);
    if words.len() < 3 {
        return 0.5;
    }

    // Surprise relative to the document
    let surprise: f64 = words
        .iter()
        .map(|w| {
            let p = global_freq.get(w).map(|c| *c as f64).unwrap_or(0.5) / global_total;
            -(p.max(1e-10)).log2()
        })
        .sum();
    let avg_surprise = surprise / words.len() as f64;
    let perplexity_score = clamp01(1.0 - (avg_surprise - 3.0) / 9.0);

    // Vocabulary richness
    let unique = words.iter().collect::<HashSet<_>>().len();
    let ttr = unique as f64 / words.len() as f64;
    let ttr_score = clamp01(1.0 - (ttr - 0.4) / 0.4);

    // Machine text gravitates toward 15-25 word sentences
    let len = words.len();
    let len_score = if (12..=28).contains(&len) {
        clamp01(0.5 + (1.0 - (len as f64 - 20.0).abs() / 20.0) * 0.5)
    } else {
        0.3
    };

    // Readability band
    let fk = flesch_reading_ease(&words, 1);
    let read_score = if (30.0..=70.0).contains(&fk) { 0.65 } else { 0.35 };

    // Entropy
    let entropy = shannon_entropy(&words);
    let entropy_score = clamp01(1.0 - (entropy - 2.0) / 4.0);

    clamp01(
        perplexity_score * 0.30
            + ttr_score * 0.20
            + len_score * 0.15
            + read_score * 0.15
            + entropy_score * 0.20,
    )
}

/// Variation of word overlap between consecutive sentences.
/// Unnaturally even overlap reads as machine-generated.
fn cross_sentence_coherence(sentences: &[String]) -> (f64, f64) {
    if sentences.len() < 3 {
        return (0.5, 0.0);
    }

    let word_sets: Vec<HashSet<String>> = sentences
        .iter()
        .map(|s| tokenize_words(s).into_iter().collect())
        .collect();

    let overlaps: Vec<f64> = word_sets
        .windows(2)
        .map(|pair| {
            let intersection = pair[1].intersection(&pair[0]).count();
            let union = pair[1].union(&pair[0]).count();
            if union > 0 {
                intersection as f64 / union as f64
            } else {
                0.0
            }
        })
        .collect();

    let (mean, std_dev) = mean_std_dev(&overlaps);
    let cv = if mean > 0.0 { std_dev / mean } else { 0.0 };

    (clamp01(1.0 - (cv - 0.1) / 0.6), cv)
}

/// Sentence-level signal with per-sentence scores for downstream
/// rewrite targeting.
pub fn analyze_sentence_level(text: &str) -> (SignalResult, Vec<SentenceScore>) {
    let sentences = split_sentences(text);
    if sentences.len() < 2 {
        let sentence_scores = sentences
            .iter()
            .map(|s| SentenceScore { text: s.clone(), score: 0.5 })
            .collect();
        return (
            SignalResult {
                score: 0.5,
                details: HashMap::from([
                    ("avgScore".to_string(), json!(0.5)),
                    ("coherenceCV".to_string(), json!(0.0)),
                ]),
            },
            sentence_scores,
        );
    }

    let all_words = tokenize_words(text);
    let global_freq = frequency_map(&all_words);
    let global_total = all_words.len() as f64;

    let sentence_scores: Vec<SentenceScore> = sentences
        .iter()
        .map(|sentence| SentenceScore {
            text: sentence.clone(),
            score: score_sentence(sentence, &global_freq, global_total),
        })
        .collect();

    let scores: Vec<f64> = sentence_scores.iter().map(|s| s.score).collect();
    let (avg_score, _) = mean_std_dev(&scores);

    let (coherence_score, coherence_cv) = cross_sentence_coherence(&sentences);

    let score = clamp01(avg_score * 0.65 + coherence_score * 0.35);

    (
        SignalResult {
            score,
            details: HashMap::from([
                ("avgScore".to_string(), json!(avg_score)),
                ("coherenceCV".to_string(), json!(coherence_cv)),
                ("sentenceCount".to_string(), json!(sentences.len())),
            ]),
        },
        sentence_scores,
    )
}
