// Synonym Engine
// Replaces AI-typical words with plainer alternatives from the lexicon
// thesaurus, keeping the original token's capitalization

use crate::models::Intensity;
use crate::services::lexicon::{synonym_rules, SynonymRule};
use crate::services::text_primitives::match_case;
use rand::Rng;
use regex::Regex;

pub fn replacement_rate(intensity: Intensity) -> f64 {
    match intensity {
        Intensity::Light => 0.2,
        Intensity::Medium => 0.4,
        Intensity::Heavy => 0.6,
    }
}

pub fn replace_with_synonyms<R: Rng>(text: &str, intensity: Intensity, rng: &mut R) -> String {
    let rate = replacement_rate(intensity);
    let mut result = text.to_string();
    for (re, rule) in synonym_rules() {
        result = substitute(&result, re, rule, rate, rng);
    }
    result
}

fn substitute<R: Rng>(
    text: &str,
    re: &Regex,
    rule: &SynonymRule,
    rate: f64,
    rng: &mut R,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in re.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        last = m.end();
        if rng.gen::<f64>() > rate {
            out.push_str(m.as_str());
            continue;
        }
        let pool = pool_for(rule, text, m.start());
        if pool.is_empty() {
            out.push_str(m.as_str());
        } else {
            let pick = pool[rng.gen_range(0..pool.len())];
            out.push_str(&match_case(m.as_str(), pick));
        }
    }
    out.push_str(&text[last..]);
    out
}

const NOUN_CUES: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "its", "their", "our", "my", "your",
    "his", "her", "each", "every",
];

const VERB_CUES: &[&str] = &[
    "to", "we", "they", "i", "you", "it", "can", "will", "would", "could", "should", "may",
    "might", "must",
];

/// Pick the synonym pool for a match. Part-of-speech entries consult the
/// token before the match; without a recognized cue the flat list applies,
/// which for those entries is empty and leaves the word alone.
fn pool_for<'a>(rule: &'a SynonymRule, text: &str, at: usize) -> &'a [&'static str] {
    if !rule.flat.is_empty() {
        return rule.flat;
    }
    let prev = text[..at]
        .split_whitespace()
        .last()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .unwrap_or_default();
    if NOUN_CUES.contains(&prev.as_str()) {
        rule.noun
    } else if VERB_CUES.contains(&prev.as_str()) {
        rule.verb
    } else {
        rule.flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rates_order() {
        assert!(replacement_rate(Intensity::Light) < replacement_rate(Intensity::Medium));
        assert!(replacement_rate(Intensity::Medium) < replacement_rate(Intensity::Heavy));
    }

    #[test]
    fn test_heavy_rewrites_flagged_words() {
        let mut rng = StdRng::seed_from_u64(11);
        let text = "This is a crucial point. The findings are significant and the method is important.";
        let mut changed = 0;
        for _ in 0..10 {
            if replace_with_synonyms(text, Intensity::Heavy, &mut rng) != text {
                changed += 1;
            }
        }
        assert!(changed >= 6, "heavy intensity should usually rewrite, got {}", changed);
    }

    #[test]
    fn test_capitalization_preserved() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..30 {
            let out = replace_with_synonyms("Crucial work here.", Intensity::Heavy, &mut rng);
            let first = out.chars().next().unwrap();
            assert!(first.is_uppercase(), "leading capital lost in {:?}", out);
        }
    }

    #[test]
    fn test_pos_entry_without_cue_is_left_alone() {
        let rule = synonym_rules()
            .iter()
            .find(|(_, r)| r.word == "impact")
            .map(|(_, r)| *r)
            .unwrap();
        // "significant impact" has an adjective before it; no determiner or
        // pronoun cue, so the empty flat pool applies
        let pool = pool_for(rule, "significant impact", 12);
        assert!(pool.is_empty());
        let pool = pool_for(rule, "the impact", 4);
        assert_eq!(pool, rule.noun);
        let pool = pool_for(rule, "they impact", 5);
        assert_eq!(pool, rule.verb);
    }

    #[test]
    fn test_plain_text_untouched() {
        let mut rng = StdRng::seed_from_u64(1);
        let text = "We walked to the shop and bought some bread.";
        assert_eq!(replace_with_synonyms(text, Intensity::Heavy, &mut rng), text);
    }
}
