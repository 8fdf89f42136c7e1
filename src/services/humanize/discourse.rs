// Discourse Breaker
// Dismantles formulaic transitions and enumerated-essay scaffolding
// (First/Second/Third/Finally, In conclusion) with casual alternatives

use crate::models::Intensity;
use crate::services::lexicon::transition_replacement_res;
use crate::services::text_primitives::match_case;
use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;

pub fn discourse_rate(intensity: Intensity) -> f64 {
    match intensity {
        Intensity::Light => 0.4,
        Intensity::Medium => 0.7,
        Intensity::Heavy => 0.9,
    }
}

// An empty alternative deletes the opener outright.
static ORDINAL_SOURCES: &[(&str, &[&str])] = &[
    (
        r"(?i)\bFirst(?:ly)?,\s",
        &["To start, ", "For one thing, ", "Starting off, ", ""],
    ),
    (
        r"(?i)\bSecond(?:ly)?,\s",
        &["Next, ", "Also, ", "Then, ", "Another thing — "],
    ),
    (
        r"(?i)\bThird(?:ly)?,\s",
        &["On top of that, ", "And then, ", "Plus, ", "What's more, "],
    ),
    (
        r"(?i)\bFinally,\s",
        &["Last but not least, ", "And lastly, ", "One more thing — ", ""],
    ),
    (
        r"(?i)\b(?:In conclusion|To summarize|In summary),?\s",
        &["So, ", "Bottom line: ", "All in all, ", "Wrapping up, ", ""],
    ),
];

fn ordinal_res() -> &'static Vec<(Regex, &'static [&'static str])> {
    static RES: OnceLock<Vec<(Regex, &'static [&'static str])>> = OnceLock::new();
    RES.get_or_init(|| {
        ORDINAL_SOURCES
            .iter()
            .map(|(src, alts)| (Regex::new(src).expect("ordinal regex"), *alts))
            .collect()
    })
}

pub fn break_discourse_patterns<R: Rng>(text: &str, intensity: Intensity, rng: &mut R) -> String {
    let rate = discourse_rate(intensity);
    let mut result = text.to_string();
    for (re, alts) in transition_replacement_res() {
        result = replace_gated(&result, re, alts, rate, rng);
    }
    for (re, alts) in ordinal_res() {
        result = replace_gated(&result, re, alts, rate, rng);
    }
    result
}

fn replace_gated<R: Rng>(
    text: &str,
    re: &Regex,
    alts: &[&str],
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
        let pick = alts[rng.gen_range(0..alts.len())];
        out.push_str(&match_case(m.as_str(), pick));
    }
    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_heavy_replaces_transitions() {
        let mut rng = StdRng::seed_from_u64(13);
        let text = "Furthermore, the data is clean. Moreover, the schema is stable. Furthermore, the tests pass.";
        let mut replaced = 0;
        for _ in 0..10 {
            let out = break_discourse_patterns(text, Intensity::Heavy, &mut rng);
            if !out.contains("Furthermore") || !out.contains("Moreover") {
                replaced += 1;
            }
        }
        assert!(replaced >= 8, "heavy rate should replace most runs, got {}", replaced);
    }

    #[test]
    fn test_ordinal_scaffolding_broken() {
        let mut rng = StdRng::seed_from_u64(21);
        let text = "First, prepare the data. Second, train the model. Third, evaluate it. Finally, ship it.";
        let mut any_gone = false;
        for _ in 0..10 {
            let out = break_discourse_patterns(text, Intensity::Heavy, &mut rng);
            if !out.contains("First,") && !out.contains("Second,") {
                any_gone = true;
            }
            assert!(out.contains("prepare the data"));
            assert!(out.contains("ship it"));
        }
        assert!(any_gone);
    }

    #[test]
    fn test_summarizer_openers_handled() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen_change = false;
        for _ in 0..10 {
            let out = break_discourse_patterns(
                "In conclusion, the approach works well.",
                Intensity::Heavy,
                &mut rng,
            );
            if !out.starts_with("In conclusion") {
                seen_change = true;
                assert!(out.contains("the approach works well"));
            }
        }
        assert!(seen_change);
    }

    #[test]
    fn test_case_preserved_on_replacement() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..30 {
            let out = break_discourse_patterns(
                "Furthermore, the cache warms quickly.",
                Intensity::Heavy,
                &mut rng,
            );
            let first = out.chars().next().unwrap();
            assert!(
                first.is_uppercase(),
                "replacement lost sentence capital: {:?}",
                out
            );
        }
    }

    #[test]
    fn test_plain_text_untouched() {
        let mut rng = StdRng::seed_from_u64(2);
        let text = "The cat sat quietly near the window and watched the street.";
        assert_eq!(
            break_discourse_patterns(text, Intensity::Heavy, &mut rng),
            text
        );
    }
}
