// Sentence Rewriter
// Structural transforms: voice flips, clause reordering, splitting long
// sentences and merging runs of short ones

use crate::models::{HumanizeStyle, Intensity};
use crate::services::lexicon::CREATIVE_FRAGMENTS;
use crate::services::text_primitives::{capitalize_first, lowercase_first, split_end_punct};
use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;

pub fn rewrite_rate(intensity: Intensity) -> f64 {
    match intensity {
        Intensity::Light => 0.2,
        Intensity::Medium => 0.35,
        Intensity::Heavy => 0.5,
    }
}

fn passive_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(.+?)\s+(?:was|were|is|are)\s+(\w+ed)\s+by\s+(.+?)([.!?]?)$")
            .expect("passive voice regex")
    })
}

/// Swap the clauses on either side of `comma` (a byte offset of `", "`).
pub(crate) fn swap_around_comma(sentence: &str, comma: usize) -> String {
    let first = &sentence[..comma];
    let second = &sentence[comma + 2..];
    let (clean_second, punct) = split_end_punct(second);
    format!(
        "{}, {}{}",
        capitalize_first(clean_second),
        lowercase_first(first),
        punct
    )
}

/// "X was VERBed by Y" becomes "Y VERBed X". Coin-flip gated so not every
/// passive construction flips.
fn passive_to_active<R: Rng>(sentence: &str, rng: &mut R) -> String {
    if let Some(caps) = passive_re().captures(sentence) {
        if rng.gen::<f64>() > 0.5 {
            let subject = caps.get(1).map_or("", |m| m.as_str()).trim();
            let verb = caps.get(2).map_or("", |m| m.as_str());
            let agent = caps.get(3).map_or("", |m| m.as_str()).trim();
            let punct = caps.get(4).map_or("", |m| m.as_str());
            return format!("{} {} {}{}", agent, verb, subject, punct);
        }
    }
    sentence.to_string()
}

fn reorder_clauses<R: Rng>(sentence: &str, rng: &mut R) -> String {
    if let Some(comma) = sentence.find(", ") {
        if comma > 10 && comma + 10 < sentence.len() && rng.gen::<f64>() > 0.6 {
            return swap_around_comma(sentence, comma);
        }
    }
    sentence.to_string()
}

/// Split a 25+ word sentence at the first well-placed conjunction.
fn split_long_sentence(sentence: &str) -> Vec<String> {
    if sentence.split_whitespace().count() < 25 {
        return vec![sentence.to_string()];
    }

    for point in [", and ", ", but ", ", however ", ", which ", "; "] {
        if let Some(idx) = sentence.find(point) {
            if idx > 15 && idx + 15 < sentence.len() {
                let first = format!("{}.", sentence[..idx].trim());
                let mut second = capitalize_first(sentence[idx + point.len()..].trim());
                if !second.ends_with(['.', '!', '?']) {
                    second.push('.');
                }
                return vec![first, second];
            }
        }
    }
    vec![sentence.to_string()]
}

fn merge_short_sentences<R: Rng>(sentences: Vec<String>, rng: &mut R) -> Vec<String> {
    const CONJUNCTIONS: &[&str] = &[" and ", " — ", ", plus ", "; "];

    let mut merged = Vec::with_capacity(sentences.len());
    let mut i = 0;
    while i < sentences.len() {
        let curr = &sentences[i];
        let next = sentences.get(i + 1);

        let both_short = next.map_or(false, |n| {
            curr.split_whitespace().count() < 8 && n.split_whitespace().count() < 8
        });
        if both_short && rng.gen::<f64>() > 0.5 {
            let next = &sentences[i + 1];
            let conj = CONJUNCTIONS[rng.gen_range(0..CONJUNCTIONS.len())];
            let (curr_body, _) = split_end_punct(curr);
            merged.push(format!("{}{}{}", curr_body, conj, lowercase_first(next)));
            i += 2;
        } else {
            merged.push(curr.clone());
            i += 1;
        }
    }
    merged
}

/// Apply structural rewrites, then a split pass for overlong sentences and
/// a merge pass for runs of short ones. Creative style may drop in one
/// standalone fragment.
pub fn rewrite_sentences<R: Rng>(
    sentences: Vec<String>,
    intensity: Intensity,
    style: HumanizeStyle,
    rng: &mut R,
) -> Vec<String> {
    let rate = rewrite_rate(intensity);

    let transformed: Vec<String> = sentences
        .into_iter()
        .map(|s| {
            if rng.gen::<f64>() > rate {
                return s;
            }
            let transform = rng.gen::<f64>();
            if transform < 0.3 {
                passive_to_active(&s, rng)
            } else if transform < 0.6 {
                reorder_clauses(&s, rng)
            } else {
                s
            }
        })
        .collect();

    let mut split = Vec::with_capacity(transformed.len());
    for s in transformed {
        if s.split_whitespace().count() > 30 && rng.gen::<f64>() > 0.4 {
            split.extend(split_long_sentence(&s));
        } else {
            split.push(s);
        }
    }

    let mut result = if rng.gen::<f64>() > 0.5 {
        merge_short_sentences(split, rng)
    } else {
        split
    };

    if style == HumanizeStyle::Creative && result.len() > 3 && rng.gen::<f64>() < 0.25 {
        let fragment = CREATIVE_FRAGMENTS[rng.gen_range(0..CREATIVE_FRAGMENTS.len())];
        let at = rng.gen_range(1..result.len());
        result.insert(at, fragment.to_string());
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_passive_flip() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut flipped = false;
        for _ in 0..20 {
            let out = passive_to_active("The report was reviewed by the committee.", &mut rng);
            if out == "the committee reviewed The report." {
                flipped = true;
            } else {
                assert_eq!(out, "The report was reviewed by the committee.");
            }
        }
        assert!(flipped, "coin-flip gate never fired across 20 rolls");
    }

    #[test]
    fn test_split_long_sentence_at_conjunction() {
        let long = "The engineering team spent several weeks profiling the storage layer under production load, and the results showed that most of the latency came from a single misconfigured cache tier.";
        let parts = split_long_sentence(long);
        assert_eq!(parts.len(), 2);
        assert!(parts[0].ends_with('.'));
        assert!(parts[1].starts_with("The results showed"));
        assert!(parts[1].ends_with('.'));
    }

    #[test]
    fn test_split_leaves_short_sentences() {
        let parts = split_long_sentence("Short sentence, and nothing more here.");
        assert_eq!(parts.len(), 1);
    }

    #[test]
    fn test_merge_short_pairs() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut merged_once = false;
        for _ in 0..20 {
            let sentences = vec![
                "The test passed.".to_string(),
                "Everyone relaxed.".to_string(),
            ];
            let out = merge_short_sentences(sentences, &mut rng);
            if out.len() == 1 {
                merged_once = true;
                assert!(out[0].contains("The test passed"));
                assert!(out[0].contains("everyone relaxed"));
            }
        }
        assert!(merged_once);
    }

    #[test]
    fn test_rewrite_sentence_count_stays_close() {
        let mut rng = StdRng::seed_from_u64(4);
        let sentences: Vec<String> = (0..6)
            .map(|i| format!("Sentence number {} talks about the weather in town today.", i))
            .collect();
        let out = rewrite_sentences(sentences, Intensity::Light, HumanizeStyle::Natural, &mut rng);
        assert!(!out.is_empty());
        assert!(out.len() <= 7);
    }

    #[test]
    fn test_creative_fragment_is_from_table() {
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..40 {
            let sentences: Vec<String> = (0..5)
                .map(|i| format!("Version {} of the draft landed late on Friday evening.", i))
                .collect();
            let out =
                rewrite_sentences(sentences, Intensity::Light, HumanizeStyle::Creative, &mut rng);
            for s in &out {
                let known = s.contains("draft landed late") || CREATIVE_FRAGMENTS.contains(&s.as_str());
                assert!(known, "unexpected sentence {:?}", s);
            }
        }
    }
}
