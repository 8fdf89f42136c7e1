// Anti-Detection Perturbation
// Statistical counter-moves: burstiness cuts, parenthetical asides and
// small human imperfections (questions, hedges, fragments, one idiom)

use crate::models::{HumanizeStyle, Intensity};
use crate::services::config_store::RewriteTuning;
use crate::services::lexicon::{
    HEDGING_PHRASES, HUMAN_FRAGMENTS, IDIOMS, PARENTHETICALS, RHETORICAL_QUESTIONS,
};
use crate::services::text_primitives::{capitalize_first, lowercase_first, split_on_terminals};
use rand::Rng;

/// Occasionally cut a long sentence short to vary the length profile.
fn inject_burstiness<R: Rng>(sentence: &str, burstiness: f64, rng: &mut R) -> String {
    let words: Vec<&str> = sentence.split_whitespace().collect();
    if words.len() > 15 && rng.gen::<f64>() < burstiness {
        let cut = (words.len() as f64 * 0.4) as usize;
        let short = words[..cut].join(" ");
        let rest = words[cut..].join(" ");
        let lead = short.strip_suffix([',', ';']).unwrap_or(&short);
        return format!("{}. {}", lead, capitalize_first(&rest));
    }
    sentence.to_string()
}

/// Slip a parenthetical aside in before the last comma of a sentence.
fn add_parentheticals<R: Rng>(text: &str, rate: f64, rng: &mut R) -> String {
    let sentences = split_on_terminals(text);
    sentences
        .into_iter()
        .map(|s| {
            if rng.gen::<f64>() < rate && s.len() > 30 {
                if let Some(at) = s.rfind(',') {
                    if at > 10 {
                        let aside = PARENTHETICALS[rng.gen_range(0..PARENTHETICALS.len())];
                        return format!("{}{}{}", &s[..at], aside, &s[at..]);
                    }
                }
            }
            s
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn add_imperfections<R: Rng>(
    text: &str,
    style: HumanizeStyle,
    tuning: &RewriteTuning,
    rng: &mut R,
) -> String {
    if style == HumanizeStyle::Academic {
        return text.to_string();
    }

    let mut sentences = split_on_terminals(text);

    // One rhetorical question about a third of the way in
    if sentences.len() > 5 && rng.gen::<f64>() < tuning.rhetorical_question {
        let base = (sentences.len() as f64 * 0.3) as usize;
        let at = (base + rng.gen_range(0..3)).min(sentences.len());
        let question = RHETORICAL_QUESTIONS[rng.gen_range(0..RHETORICAL_QUESTIONS.len())];
        sentences.insert(at, question.to_string());
    }

    if matches!(style, HumanizeStyle::Casual | HumanizeStyle::Natural) {
        for sentence in sentences.iter_mut() {
            if rng.gen::<f64>() < tuning.hedging && sentence.len() > 20 {
                let hedge = HEDGING_PHRASES[rng.gen_range(0..HEDGING_PHRASES.len())];
                *sentence = format!("{}, {}", hedge, lowercase_first(sentence));
            }
        }
    }

    if style == HumanizeStyle::Casual && sentences.len() > 4 && rng.gen::<f64>() < tuning.fragment
    {
        let at = rng.gen_range(0..3.min(sentences.len()));
        let fragment = HUMAN_FRAGMENTS[rng.gen_range(0..HUMAN_FRAGMENTS.len())];
        sentences[at] = format!("{}{}", fragment, lowercase_first(&sentences[at]));
    }

    // At most one idiom, dropped into the first two-thirds
    if rng.gen::<f64>() < tuning.idiom && sentences.len() > 2 {
        let bound = (sentences.len() * 2 / 3).max(1);
        let at = rng.gen_range(0..bound);
        let idiom = IDIOMS[rng.gen_range(0..IDIOMS.len())];
        sentences.insert(at + 1, idiom.to_string());
    }

    sentences.join(" ")
}

/// Full perturbation pass. Light intensity skips parentheticals; academic
/// style skips everything past them.
pub fn apply_perturbations<R: Rng>(
    text: &str,
    style: HumanizeStyle,
    intensity: Intensity,
    tuning: &RewriteTuning,
    rng: &mut R,
) -> String {
    let sentences = split_on_terminals(text);
    let bursty: Vec<String> = sentences
        .iter()
        .map(|s| inject_burstiness(s, tuning.burstiness, rng))
        .collect();
    let mut result = bursty.join(" ");

    if intensity != Intensity::Light {
        result = add_parentheticals(&result, tuning.parenthetical, rng);
    }

    add_imperfections(&result, style, tuning, rng)
}
