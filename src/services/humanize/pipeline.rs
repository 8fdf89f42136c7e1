// Humanization Pipeline
// Ordered multi-stage rewrite with optional self-verification against
// the detection engine.
//
// Intensity levels:
// - light: rules only
// - medium: paraphrase collaborator + rules
// - heavy: paraphrase + rules + self-verification loop

use crate::models::{HumanizationResult, HumanizeOptions, Intensity, ProgressEvent};
use crate::services::config_store::{DecisionThresholds, EngineConfig, RewriteTuning};
use crate::services::humanize::discourse::break_discourse_patterns;
use crate::services::humanize::paraphrase::{paraphrase_sentences, ParaphraseResource};
use crate::services::humanize::perturb::apply_perturbations;
use crate::services::humanize::rewriter::rewrite_sentences;
use crate::services::humanize::synonym::replace_with_synonyms;
use crate::services::humanize::verifier::{self_verify, VerificationOracle};
use crate::services::humanize::vocabulary::enrich_vocabulary;
use crate::services::lexicon::transition_start_re;
use crate::services::text_primitives::{split_on_terminals, split_sentences};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// One sentence with the flags the pipeline cares about.
#[derive(Debug, Clone)]
pub struct ParsedSentence {
    pub text: String,
    pub index: usize,
    pub word_count: usize,
    pub is_question: bool,
    pub is_exclamation: bool,
    pub starts_with_transition: bool,
}

pub fn parse_sentences(text: &str) -> Vec<ParsedSentence> {
    split_sentences(text)
        .into_iter()
        .enumerate()
        .map(|(index, text)| ParsedSentence {
            word_count: text.split_whitespace().count(),
            is_question: text.ends_with('?'),
            is_exclamation: text.ends_with('!'),
            starts_with_transition: transition_start_re().is_match(&text),
            index,
            text,
        })
        .collect()
}

/// The rewrite engine. Construct once, call [`Humanizer::humanize`] per
/// request; the oracle is only consulted at heavy intensity.
pub struct Humanizer {
    oracle: Arc<dyn VerificationOracle>,
    paraphrase: Arc<ParaphraseResource>,
    thresholds: DecisionThresholds,
    tuning: RewriteTuning,
}

impl Humanizer {
    pub fn new(oracle: Arc<dyn VerificationOracle>) -> Self {
        Self {
            oracle,
            paraphrase: Arc::new(ParaphraseResource::new()),
            thresholds: DecisionThresholds::default(),
            tuning: RewriteTuning::default(),
        }
    }

    pub fn with_config(oracle: Arc<dyn VerificationOracle>, config: &EngineConfig) -> Self {
        Self {
            oracle,
            paraphrase: Arc::new(ParaphraseResource::new()),
            thresholds: config.thresholds.clone(),
            tuning: config.rewrite.clone(),
        }
    }

    pub fn with_paraphrase_resource(mut self, resource: Arc<ParaphraseResource>) -> Self {
        self.paraphrase = resource;
        self
    }

    pub async fn humanize(
        &self,
        text: &str,
        options: &HumanizeOptions,
        progress: Option<mpsc::Sender<ProgressEvent>>,
    ) -> HumanizationResult {
        let start = Instant::now();
        let deadline = options
            .deadline_ms
            .map(|ms| start + Duration::from_millis(ms));
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut current = self
            .transform(text, options, deadline, &mut rng, &progress, start)
            .await;

        // Self-verification loop, heavy only
        let mut verification = None;
        if options.intensity == Intensity::Heavy {
            for round in 0..options.max_iterations {
                if deadline_hit(deadline) {
                    warn!("[HUMANIZE] deadline hit during verification, keeping current text");
                    break;
                }
                let outcome = self_verify(self.oracle.as_ref(), &current, &self.thresholds).await;
                emit(
                    &progress,
                    "verify",
                    format!("round {} score {:.4}", round + 1, outcome.score),
                    start,
                )
                .await;
                let passed = outcome.passed;
                let flagged = outcome.flagged_sentences.clone();
                verification = Some(outcome);
                if passed {
                    break;
                }

                if !flagged.is_empty() {
                    for sentence in &flagged {
                        let mut replacement =
                            replace_with_synonyms(sentence, Intensity::Heavy, &mut rng);
                        replacement =
                            break_discourse_patterns(&replacement, Intensity::Heavy, &mut rng);
                        replacement =
                            enrich_vocabulary(&replacement, options.style, Intensity::Heavy, &mut rng);
                        current = current.replace(sentence.as_str(), &replacement);
                    }
                } else {
                    current = replace_with_synonyms(&current, Intensity::Heavy, &mut rng);
                    current = apply_perturbations(
                        &current,
                        options.style,
                        Intensity::Heavy,
                        &self.tuning,
                        &mut rng,
                    );
                }
            }
        }

        // Collapse whitespace runs left behind by splices
        current = current.split_whitespace().collect::<Vec<_>>().join(" ");

        let elapsed = start.elapsed().as_millis() as u64;
        emit(&progress, "done", String::new(), start).await;
        info!(
            "[HUMANIZE] done style={} intensity={} elapsed_ms={}",
            options.style, options.intensity, elapsed
        );

        HumanizationResult {
            original: text.to_string(),
            humanized: current,
            style: options.style,
            intensity: options.intensity,
            self_verification: verification,
            stage_count: stage_count(options.intensity),
            processing_time_ms: elapsed,
        }
    }

    /// Run the transform stages in order, stopping early when the deadline
    /// passes. Returns the text produced so far.
    async fn transform(
        &self,
        text: &str,
        options: &HumanizeOptions,
        deadline: Option<Instant>,
        rng: &mut StdRng,
        progress: &Option<mpsc::Sender<ProgressEvent>>,
        start: Instant,
    ) -> String {
        let parsed = parse_sentences(text);
        emit(progress, "parse", format!("{} sentences", parsed.len()), start).await;
        let mut sentences: Vec<String> = parsed.into_iter().map(|s| s.text).collect();

        if matches!(options.intensity, Intensity::Medium | Intensity::Heavy) {
            if deadline_hit(deadline) {
                return finalize_early(sentences.join(" "));
            }
            sentences =
                paraphrase_sentences(&self.paraphrase, sentences, &self.tuning, rng).await;
            emit(progress, "paraphrase", String::new(), start).await;
        }

        let mut current = sentences.join(" ");

        if deadline_hit(deadline) {
            return finalize_early(current);
        }
        current = replace_with_synonyms(&current, options.intensity, rng);
        emit(progress, "synonyms", String::new(), start).await;

        if deadline_hit(deadline) {
            return finalize_early(current);
        }
        let pieces = split_on_terminals(&current);
        let rewritten = rewrite_sentences(pieces, options.intensity, options.style, rng);
        current = rewritten.join(" ");
        emit(progress, "rewrite", String::new(), start).await;

        if deadline_hit(deadline) {
            return finalize_early(current);
        }
        current = break_discourse_patterns(&current, options.intensity, rng);
        emit(progress, "discourse", String::new(), start).await;

        if deadline_hit(deadline) {
            return finalize_early(current);
        }
        current = enrich_vocabulary(&current, options.style, options.intensity, rng);
        emit(progress, "vocabulary", String::new(), start).await;

        if deadline_hit(deadline) {
            return finalize_early(current);
        }
        current = apply_perturbations(&current, options.style, options.intensity, &self.tuning, rng);
        emit(progress, "perturb", String::new(), start).await;

        current
    }
}

fn stage_count(intensity: Intensity) -> usize {
    match intensity {
        Intensity::Light => 3,
        Intensity::Medium => 4,
        Intensity::Heavy => 5,
    }
}

fn deadline_hit(deadline: Option<Instant>) -> bool {
    deadline.map_or(false, |d| Instant::now() >= d)
}

fn finalize_early(current: String) -> String {
    warn!("[HUMANIZE] deadline hit, finalizing with partial pipeline");
    current
}

async fn emit(
    progress: &Option<mpsc::Sender<ProgressEvent>>,
    stage: &str,
    detail: String,
    start: Instant,
) {
    if let Some(tx) = progress {
        let event = ProgressEvent::new(stage, detail, start.elapsed().as_millis() as u64);
        // A dropped receiver just means nobody is watching
        let _ = tx.send(event).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::humanize::verifier::{OracleError, OracleReport, VerificationOracle};
    use crate::models::{Classification, SentenceScore};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingOracle {
        calls: AtomicUsize,
        score: f64,
    }

    impl CountingOracle {
        fn new(score: f64) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                score,
            }
        }
    }

    #[async_trait]
    impl VerificationOracle for CountingOracle {
        async fn score(&self, text: &str) -> Result<OracleReport, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(OracleReport {
                score: self.score,
                classification: Classification::Mixed,
                confidence: 0.5,
                sentence_scores: split_on_terminals(text)
                    .into_iter()
                    .map(|s| SentenceScore {
                        text: s,
                        score: self.score,
                    })
                    .collect(),
            })
        }
    }

    const SAMPLE: &str = "The new library opened last month after years of delays. Residents lined up outside before the doors even opened. The children's section filled up first, which surprised nobody. Volunteers handed out maps and answered questions all morning. By noon the reading rooms were full and the cafe had run out of pastries. The director called it the best day of her career.";

    #[test]
    fn test_parse_sentences_flags() {
        let parsed = parse_sentences("However, the plan changed. Did it work? It did!");
        assert_eq!(parsed.len(), 3);
        assert!(parsed[0].starts_with_transition);
        assert!(parsed[1].is_question);
        assert!(parsed[2].is_exclamation);
        assert_eq!(parsed[2].index, 2);
        assert_eq!(parsed[0].word_count, 4);
    }

    #[tokio::test]
    async fn test_light_skips_paraphrase_and_verification() {
        let oracle = Arc::new(CountingOracle::new(0.9));
        let humanizer = Humanizer::new(oracle.clone());
        let options = HumanizeOptions {
            intensity: Intensity::Light,
            seed: Some(42),
            ..HumanizeOptions::default()
        };
        let result = humanizer.humanize(SAMPLE, &options, None).await;
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
        assert!(result.self_verification.is_none());
        assert_eq!(result.stage_count, 3);
        assert!(!result.humanized.is_empty());
    }

    #[tokio::test]
    async fn test_heavy_runs_bounded_verification() {
        let oracle = Arc::new(CountingOracle::new(0.9));
        let humanizer = Humanizer::new(oracle.clone());
        let options = HumanizeOptions {
            intensity: Intensity::Heavy,
            max_iterations: 2,
            seed: Some(7),
            ..HumanizeOptions::default()
        };
        let result = humanizer.humanize(SAMPLE, &options, None).await;
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 2);
        let verification = result.self_verification.expect("verification outcome");
        assert!(!verification.passed);
        assert_eq!(result.stage_count, 5);
    }

    #[tokio::test]
    async fn test_single_iteration_still_reports_outcome() {
        let oracle = Arc::new(CountingOracle::new(0.9));
        let humanizer = Humanizer::new(oracle.clone());
        let options = HumanizeOptions {
            intensity: Intensity::Heavy,
            max_iterations: 1,
            seed: Some(7),
            ..HumanizeOptions::default()
        };
        let result = humanizer.humanize(SAMPLE, &options, None).await;
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 1);
        let verification = result.self_verification.expect("verification outcome");
        assert!(!verification.passed);
        assert!((0.0..=1.0).contains(&verification.score));
    }

    #[tokio::test]
    async fn test_heavy_stops_on_pass() {
        let oracle = Arc::new(CountingOracle::new(0.1));
        let humanizer = Humanizer::new(oracle.clone());
        let options = HumanizeOptions {
            intensity: Intensity::Heavy,
            max_iterations: 3,
            seed: Some(7),
            ..HumanizeOptions::default()
        };
        let result = humanizer.humanize(SAMPLE, &options, None).await;
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 1);
        let verification = result.self_verification.expect("verification outcome");
        assert!(verification.passed);
    }

    #[tokio::test]
    async fn test_seeded_runs_are_deterministic() {
        let humanizer = Humanizer::new(Arc::new(CountingOracle::new(0.1)));
        let options = HumanizeOptions {
            intensity: Intensity::Medium,
            seed: Some(99),
            ..HumanizeOptions::default()
        };
        let a = humanizer.humanize(SAMPLE, &options, None).await;
        let b = humanizer.humanize(SAMPLE, &options, None).await;
        assert_eq!(a.humanized, b.humanized);
    }

    #[tokio::test]
    async fn test_content_survives_light_pass() {
        let humanizer = Humanizer::new(Arc::new(CountingOracle::new(0.1)));
        let options = HumanizeOptions {
            intensity: Intensity::Light,
            seed: Some(3),
            ..HumanizeOptions::default()
        };
        let result = humanizer.humanize(SAMPLE, &options, None).await;
        let lower = result.humanized.to_lowercase();
        for noun in ["library", "residents", "volunteers", "director"] {
            assert!(lower.contains(noun), "{} missing from {:?}", noun, lower);
        }
        let before = split_on_terminals(SAMPLE).len() as i64;
        let after = split_on_terminals(&result.humanized).len() as i64;
        assert!((before - after).abs() < 5);
    }

    #[tokio::test]
    async fn test_progress_events_ordered() {
        let humanizer = Humanizer::new(Arc::new(CountingOracle::new(0.1)));
        let (tx, mut rx) = mpsc::channel(32);
        let options = HumanizeOptions {
            intensity: Intensity::Light,
            seed: Some(1),
            ..HumanizeOptions::default()
        };
        humanizer.humanize(SAMPLE, &options, Some(tx)).await;

        let mut stages = Vec::new();
        while let Some(event) = rx.recv().await {
            stages.push(event.stage);
        }
        assert_eq!(stages.first().map(String::as_str), Some("parse"));
        assert_eq!(stages.last().map(String::as_str), Some("done"));
        let synonyms_at = stages.iter().position(|s| s == "synonyms").unwrap();
        let perturb_at = stages.iter().position(|s| s == "perturb").unwrap();
        assert!(synonyms_at < perturb_at);
        assert!(!stages.contains(&"paraphrase".to_string()));
    }

    #[tokio::test]
    async fn test_expired_deadline_still_returns_text() {
        let humanizer = Humanizer::new(Arc::new(CountingOracle::new(0.9)));
        let options = HumanizeOptions {
            intensity: Intensity::Heavy,
            deadline_ms: Some(0),
            seed: Some(5),
            ..HumanizeOptions::default()
        };
        let result = humanizer.humanize(SAMPLE, &options, None).await;
        assert!(!result.humanized.is_empty());
        assert!(result.self_verification.is_none());
    }
}
