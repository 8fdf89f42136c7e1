// Statistical Signal
// Perplexity proxy, burstiness, entropy variation and n-gram repetition

use crate::models::SignalResult;
use crate::services::text_primitives::{
    clamp01, frequency_map, mean_std_dev, ngrams, shannon_entropy, split_sentences, tokenize_words,
};
use serde_json::{json, Value};
use std::collections::HashMap;

/// Per-sentence unigram surprise as a perplexity proxy.
/// Low mean with low variation reads as machine-generated.
fn perplexity_signal(text: &str) -> (f64, Value) {
    let gate = || (0.5, json!({"score": 0.5, "mean": 0.0, "variation": 0.0}));

    let words = tokenize_words(text);
    if words.len() < 5 {
        return gate();
    }

    let freq = frequency_map(&words);
    let total = words.len() as f64;

    let sentences = split_sentences(text);
    if sentences.len() < 2 {
        return gate();
    }

    let per_sentence: Vec<f64> = sentences
        .iter()
        .map(|sentence| {
            let s_words = tokenize_words(sentence);
            if s_words.is_empty() {
                return 0.0;
            }
            let surprise: f64 = s_words
                .iter()
                .map(|w| {
                    let p = freq.get(w).map(|c| *c as f64).unwrap_or(0.5) / total;
                    -(p.max(1e-10)).log2()
                })
                .sum();
            surprise / s_words.len() as f64
        })
        .collect();

    let (mean, std_dev) = mean_std_dev(&per_sentence);
    // Typical machine text lands at mean surprise 3-6, human 6-12
    let mean_score = clamp01(1.0 - (mean - 3.0) / 9.0);
    let variation = if mean > 0.0 { std_dev / mean } else { 0.0 };
    let variation_score = if mean > 0.0 {
        clamp01(1.0 - std_dev / mean)
    } else {
        0.5
    };

    let score = clamp01(mean_score * 0.5 + variation_score * 0.5);
    (score, json!({"score": score, "mean": mean, "variation": variation}))
}

/// Burstiness: coefficient of variation of sentence lengths.
/// Uniform lengths are the machine tell.
fn burstiness_signal(text: &str) -> (f64, Value) {
    let sentences = split_sentences(text);
    if sentences.len() < 3 {
        return (0.5, json!({"score": 0.5, "value": 0.0}));
    }

    let lengths: Vec<f64> = sentences
        .iter()
        .map(|s| tokenize_words(s).len() as f64)
        .collect();
    let (mean, std_dev) = mean_std_dev(&lengths);

    if mean == 0.0 {
        return (0.5, json!({"score": 0.5, "value": 0.0}));
    }

    // Machine text: B around 0.2-0.4, human: 0.4-0.8+
    let b = std_dev / mean;
    let score = clamp01(1.0 - (b - 0.2) / 0.6);

    (score, json!({"score": score, "value": b}))
}

/// Variation of per-sentence Shannon entropy.
fn entropy_variation_signal(text: &str) -> (f64, Value) {
    let sentences = split_sentences(text);
    if sentences.len() < 3 {
        return (0.5, json!({"score": 0.5, "mean": 0.0, "cv": 0.0}));
    }

    let entropies: Vec<f64> = sentences
        .iter()
        .map(|s| shannon_entropy(&tokenize_words(s)))
        .collect();

    let (mean, std_dev) = mean_std_dev(&entropies);
    if mean == 0.0 {
        return (0.5, json!({"score": 0.5, "mean": 0.0, "cv": 0.0}));
    }

    let cv = std_dev / mean;
    let score = clamp01(1.0 - (cv - 0.1) / 0.5);

    (score, json!({"score": score, "mean": mean, "cv": cv}))
}

/// Share of bigrams and trigrams that repeat within the text.
fn ngram_predictability_signal(text: &str) -> (f64, Value) {
    let words = tokenize_words(text);
    if words.len() < 10 {
        return (
            0.5,
            json!({"score": 0.5, "bigramRepetition": 0.0, "trigramRepetition": 0.0}),
        );
    }

    let bigram_freq = frequency_map(&ngrams(&words, 2));
    let trigram_freq = frequency_map(&ngrams(&words, 3));

    let repeat_ratio = |freq: &HashMap<String, usize>| -> f64 {
        if freq.is_empty() {
            return 0.0;
        }
        let repeats = freq.values().filter(|c| **c >= 2).count();
        repeats as f64 / freq.len() as f64
    };

    let bigram_ratio = repeat_ratio(&bigram_freq);
    let trigram_ratio = repeat_ratio(&trigram_freq);

    let score = clamp01((bigram_ratio * 0.4 + trigram_ratio * 0.6) * 3.0);

    (
        score,
        json!({"score": score, "bigramRepetition": bigram_ratio, "trigramRepetition": trigram_ratio}),
    )
}

/// Combined statistical signal.
pub fn analyze_statistical(text: &str) -> SignalResult {
    let (perplexity, perplexity_details) = perplexity_signal(text);
    let (burstiness, burstiness_details) = burstiness_signal(text);
    let (entropy, entropy_details) = entropy_variation_signal(text);
    let (ngram, ngram_details) = ngram_predictability_signal(text);

    let score = clamp01(perplexity * 0.30 + burstiness * 0.30 + entropy * 0.20 + ngram * 0.20);

    SignalResult {
        score,
        details: HashMap::from([
            ("perplexity".to_string(), perplexity_details),
            ("burstiness".to_string(), burstiness_details),
            ("entropy".to_string(), entropy_details),
            ("ngramPredictability".to_string(), ngram_details),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIFORM: &str = "The system processes the data quickly. The system handles the data cleanly. The system stores the data safely. The system checks the data carefully. The system moves the data smoothly.";

    const VARIED: &str = "Whoa. I didn't expect that result at all, honestly, given how badly Tuesday went. Everything crashed twice, then limped along. Strange, right? We shipped anyway and nobody complained much.";

    #[test]
    fn test_short_text_gates_to_half() {
        let result = analyze_statistical("Too short.");
        assert!((result.score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_uniform_text_scores_higher_than_varied() {
        let uniform = analyze_statistical(UNIFORM).score;
        let varied = analyze_statistical(VARIED).score;
        assert!(uniform > varied + 0.1, "uniform={} varied={}", uniform, varied);
        assert!(uniform > 0.7);
    }

    #[test]
    fn test_score_in_range() {
        for text in [UNIFORM, VARIED, "", "One word", "a b c d e f g h i j k."] {
            let score = analyze_statistical(text).score;
            assert!((0.0..=1.0).contains(&score), "out of range for {:?}", text);
        }
    }

    #[test]
    fn test_details_present() {
        let result = analyze_statistical(UNIFORM);
        for key in ["perplexity", "burstiness", "entropy", "ngramPredictability"] {
            assert!(result.details.contains_key(key), "missing {}", key);
        }
    }

    #[test]
    fn test_ngram_repetition_detected() {
        let uniform = analyze_statistical(UNIFORM);
        let varied = analyze_statistical(VARIED);
        let ratio = |r: &SignalResult| r.details["ngramPredictability"]["bigramRepetition"]
            .as_f64()
            .unwrap();
        assert!(ratio(&uniform) > 0.05);
        assert!(ratio(&uniform) > ratio(&varied));
    }
}
