// Analysis Engine
// Fans out the detection signals, fuses the scores and classifies the text

use super::external::ExternalSignal;
use super::{
    coherence, fingerprint, linguistic, readability, sentence_level, statistical, stylometric,
};
use crate::models::{
    AnalysisMetadata, AnalysisResult, Classification, SentenceScore, SignalResult,
};
use crate::services::config_store::{DecisionThresholds, EngineConfig, WeightConfig};
use crate::services::lexicon::LEXICON_VERSION;
use crate::services::text_primitives::clamp01;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{info, warn};

const LOCAL_SIGNALS: &[&str] = &[
    "statistical",
    "linguistic",
    "sentenceLevel",
    "stylometric",
    "coherence",
    "fingerprint",
    "readabilityForensics",
];

const EXTERNAL_TIMEOUT: Duration = Duration::from_secs(30);

#[inline]
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[inline]
fn round3(v: f64) -> f64 {
    (v * 1_000.0).round() / 1_000.0
}

#[inline]
fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

/// Map a fused score to a label and confidence (2 decimal places).
pub fn classify_score(thresholds: &DecisionThresholds, score: f64) -> (Classification, f64) {
    if score < thresholds.human_below {
        (Classification::Human, round2(1.0 - score))
    } else if score < thresholds.ai_at_or_above {
        (Classification::Mixed, round2(1.0 - (score - 0.5).abs() * 2.0))
    } else {
        (Classification::Ai, round2(score))
    }
}

/// Multi-signal detection engine. All local signals are pure CPU work;
/// an optional external signal joins the fusion under a timeout.
pub struct AnalysisEngine {
    weights: WeightConfig,
    thresholds: DecisionThresholds,
    external: Option<Arc<dyn ExternalSignal>>,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl AnalysisEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            weights: config.weights.clone(),
            thresholds: config.thresholds.clone(),
            external: None,
        }
    }

    pub fn with_external(config: &EngineConfig, external: Arc<dyn ExternalSignal>) -> Self {
        Self {
            weights: config.weights.clone(),
            thresholds: config.thresholds.clone(),
            external: Some(external),
        }
    }

    pub fn thresholds(&self) -> &DecisionThresholds {
        &self.thresholds
    }

    /// Run every signal concurrently and fuse the results.
    pub async fn analyze(&self, text: &str) -> AnalysisResult {
        let started = Instant::now();
        info!(
            "[ANALYSIS] starting, chars={} words={}",
            text.chars().count(),
            text.split_whitespace().count()
        );

        let shared: Arc<str> = Arc::from(text);

        // Signals that never report stay None in the breakdown.
        let mut breakdown: HashMap<String, Option<SignalResult>> = LOCAL_SIGNALS
            .iter()
            .map(|name| (name.to_string(), None))
            .collect();

        let mut tasks: JoinSet<(&'static str, SignalResult, Option<Vec<SentenceScore>>)> =
            JoinSet::new();

        let t = shared.clone();
        tasks.spawn_blocking(move || ("statistical", statistical::analyze_statistical(&t), None));
        let t = shared.clone();
        tasks.spawn_blocking(move || ("linguistic", linguistic::analyze_linguistic(&t), None));
        let t = shared.clone();
        tasks.spawn_blocking(move || {
            let (signal, scores) = sentence_level::analyze_sentence_level(&t);
            ("sentenceLevel", signal, Some(scores))
        });
        let t = shared.clone();
        tasks.spawn_blocking(move || ("stylometric", stylometric::analyze_stylometric(&t), None));
        let t = shared.clone();
        tasks.spawn_blocking(move || ("coherence", coherence::analyze_coherence(&t), None));
        let t = shared.clone();
        tasks.spawn_blocking(move || ("fingerprint", fingerprint::analyze_fingerprint(&t), None));
        let t = shared.clone();
        tasks.spawn_blocking(move || {
            (
                "readabilityForensics",
                readability::analyze_readability_forensics(&t),
                None,
            )
        });

        let local_results = async {
            let mut out = Vec::new();
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(item) => out.push(item),
                    Err(e) => warn!("[ANALYSIS] signal task failed: {}", e),
                }
            }
            out
        };

        let external_result = async {
            match self.external.as_deref() {
                Some(ext) => match tokio::time::timeout(EXTERNAL_TIMEOUT, ext.analyze(&shared)).await
                {
                    Ok(result) => Some((ext.name().to_string(), result)),
                    Err(_) => {
                        warn!("[ANALYSIS] external signal '{}' timed out", ext.name());
                        Some((ext.name().to_string(), None))
                    }
                },
                None => None,
            }
        };

        let (locals, external) = tokio::join!(local_results, external_result);

        let mut sentence_scores = Vec::new();
        for (name, signal, scores) in locals {
            if let Some(s) = scores {
                sentence_scores = s;
            }
            breakdown.insert(name.to_string(), Some(signal));
        }
        if let Some((name, result)) = external {
            breakdown.insert(name, result);
        }

        self.assemble(text, breakdown, sentence_scores, started)
    }

    /// Synchronous variant running the local signals in sequence.
    /// The external signal, if any, is skipped.
    pub fn analyze_blocking(&self, text: &str) -> AnalysisResult {
        let started = Instant::now();

        let (sentence_signal, sentence_scores) = sentence_level::analyze_sentence_level(text);
        let breakdown: HashMap<String, Option<SignalResult>> = HashMap::from([
            (
                "statistical".to_string(),
                Some(statistical::analyze_statistical(text)),
            ),
            (
                "linguistic".to_string(),
                Some(linguistic::analyze_linguistic(text)),
            ),
            ("sentenceLevel".to_string(), Some(sentence_signal)),
            (
                "stylometric".to_string(),
                Some(stylometric::analyze_stylometric(text)),
            ),
            (
                "coherence".to_string(),
                Some(coherence::analyze_coherence(text)),
            ),
            (
                "fingerprint".to_string(),
                Some(fingerprint::analyze_fingerprint(text)),
            ),
            (
                "readabilityForensics".to_string(),
                Some(readability::analyze_readability_forensics(text)),
            ),
        ]);

        self.assemble(text, breakdown, sentence_scores, started)
    }

    fn assemble(
        &self,
        text: &str,
        breakdown: HashMap<String, Option<SignalResult>>,
        sentence_scores: Vec<SentenceScore>,
        started: Instant,
    ) -> AnalysisResult {
        let (score, effective_weights) = self.fuse(&breakdown);
        let (classification, confidence) = classify_score(&self.thresholds, score);

        let metadata = AnalysisMetadata {
            text_length: text.chars().count(),
            word_count: text.split_whitespace().count(),
            processing_time_ms: started.elapsed().as_millis() as u64,
            signals: breakdown.len(),
            lexicon_version: LEXICON_VERSION.to_string(),
        };

        info!(
            "[ANALYSIS] done score={} classification={} elapsed_ms={}",
            score, classification, metadata.processing_time_ms
        );

        AnalysisResult {
            score,
            classification,
            confidence,
            breakdown,
            effective_weights,
            sentence_scores,
            weights: self.weights.clone(),
            metadata,
        }
    }

    /// Weighted fusion over the signals that reported. Weights renormalize
    /// over the available set; no signals at all yields a neutral 0.5.
    fn fuse(
        &self,
        breakdown: &HashMap<String, Option<SignalResult>>,
    ) -> (f64, HashMap<String, f64>) {
        let mut available: Vec<(&str, f64)> = breakdown
            .iter()
            .filter_map(|(name, result)| result.as_ref().map(|r| (name.as_str(), r.score)))
            .collect();
        // Stable iteration keeps float summation deterministic
        available.sort_by(|a, b| a.0.cmp(b.0));

        let total: f64 = available.iter().map(|(name, _)| self.weights.get(name)).sum();
        if total == 0.0 {
            return (0.5, HashMap::new());
        }

        let mut effective = HashMap::new();
        let mut fused = 0.0;
        for (name, signal_score) in available {
            let normalized = self.weights.get(name) / total;
            effective.insert(name.to_string(), round3(normalized));
            fused += normalized * signal_score;
        }

        (round4(clamp01(fused)), effective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::BTreeMap;

    struct StubSignal {
        signal_name: &'static str,
        result: Option<f64>,
    }

    #[async_trait]
    impl ExternalSignal for StubSignal {
        fn name(&self) -> &str {
            self.signal_name
        }

        async fn analyze(&self, _text: &str) -> Option<SignalResult> {
            self.result.map(|score| SignalResult {
                score,
                details: HashMap::new(),
            })
        }
    }

    const HUMAN_TEXT: &str = "I couldn't believe what happened at the grocery store today. This old guy in front of me was arguing with the cashier about expired coupons. Meanwhile, I'm standing there with my ice cream melting. Finally gave up and switched to self-checkout, which of course didn't work either.";

    const AI_TEXT: &str = "In today's rapidly evolving digital landscape, artificial intelligence has emerged as a transformative force. Moreover, the integration of machine learning algorithms has significantly enhanced efficiency. Furthermore, it is important to note that comprehensive strategies must be developed. Additionally, organizations must navigate the complexities of implementation.";

    #[test]
    fn test_classification_boundaries() {
        let t = DecisionThresholds::default();

        let (label, confidence) = classify_score(&t, 0.34);
        assert_eq!(label, Classification::Human);
        assert!((confidence - 0.66).abs() < 1e-9);

        let (label, confidence) = classify_score(&t, 0.35);
        assert_eq!(label, Classification::Mixed);
        assert!((confidence - 0.7).abs() < 1e-9);

        let (label, _) = classify_score(&t, 0.649);
        assert_eq!(label, Classification::Mixed);

        let (label, confidence) = classify_score(&t, 0.65);
        assert_eq!(label, Classification::Ai);
        assert!((confidence - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_mixed_confidence_peaks_at_center() {
        let t = DecisionThresholds::default();
        let (_, confidence) = classify_score(&t, 0.5);
        assert!((confidence - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_result_structure() {
        let engine = AnalysisEngine::default();
        let result = engine
            .analyze("This is a test sentence that should be long enough to analyze properly. We need multiple sentences for the analyzers to work correctly. Here is another sentence with different words.")
            .await;

        assert!((0.0..=1.0).contains(&result.score));
        assert_eq!(result.breakdown.len(), 7);
        for name in LOCAL_SIGNALS {
            assert!(result.breakdown[*name].is_some(), "missing signal {}", name);
        }
        assert_eq!(result.metadata.signals, 7);
        assert!(!result.sentence_scores.is_empty());
        assert!(result.metadata.word_count > 0);
    }

    #[tokio::test]
    async fn test_ai_text_scores_higher_than_human() {
        let engine = AnalysisEngine::default();
        let human = engine.analyze(HUMAN_TEXT).await;
        let ai = engine.analyze(AI_TEXT).await;
        assert!(
            ai.score > human.score,
            "ai={} human={}",
            ai.score,
            human.score
        );
    }

    #[tokio::test]
    async fn test_effective_weights_sum_to_one() {
        let engine = AnalysisEngine::default();
        let result = engine
            .analyze("Test text for weight analysis with enough words to process correctly.")
            .await;
        let total: f64 = result.effective_weights.values().sum();
        assert!((total - 1.0).abs() < 0.01, "total={}", total);
    }

    #[tokio::test]
    async fn test_short_text_stays_in_range() {
        let engine = AnalysisEngine::default();
        for text in ["", "Hi.", "Hello world."] {
            let result = engine.analyze(text).await;
            assert!((0.0..=1.0).contains(&result.score), "text={:?}", text);
        }
    }

    #[test]
    fn test_zero_weights_fuse_to_neutral() {
        let config = EngineConfig {
            weights: WeightConfig(BTreeMap::new()),
            ..EngineConfig::default()
        };
        let engine = AnalysisEngine::new(&config);
        let result = engine.analyze_blocking("Some reasonable sentence here. Another one follows it.");
        assert!((result.score - 0.5).abs() < 1e-9);
        assert!(result.effective_weights.is_empty());
        assert_eq!(result.classification, Classification::Mixed);
    }

    #[tokio::test]
    async fn test_unavailable_external_omitted_from_effective_weights() {
        let engine = AnalysisEngine::with_external(
            &EngineConfig::default(),
            Arc::new(StubSignal { signal_name: "metaDetector", result: None }),
        );
        let result = engine
            .analyze("One plain sentence for the fusion path. Another plain sentence follows it here.")
            .await;

        assert_eq!(result.breakdown.len(), 8);
        assert!(result.breakdown["metaDetector"].is_none());
        assert!(!result.effective_weights.contains_key("metaDetector"));
        let total: f64 = result.effective_weights.values().sum();
        assert!((total - 1.0).abs() < 0.01, "total={}", total);
    }

    #[tokio::test]
    async fn test_reporting_external_joins_fusion() {
        let config = EngineConfig {
            weights: WeightConfig::with_overrides(BTreeMap::from([(
                "metaDetector".to_string(),
                0.15,
            )])),
            ..EngineConfig::default()
        };
        let engine = AnalysisEngine::with_external(
            &config,
            Arc::new(StubSignal { signal_name: "metaDetector", result: Some(0.9) }),
        );
        let result = engine
            .analyze("One plain sentence for the fusion path. Another plain sentence follows it here.")
            .await;

        assert!(result.breakdown["metaDetector"].is_some());
        assert!(result.effective_weights["metaDetector"] > 0.0);
        let total: f64 = result.effective_weights.values().sum();
        assert!((total - 1.0).abs() < 0.01, "total={}", total);
    }

    #[test]
    fn test_blocking_analysis_is_deterministic() {
        let engine = AnalysisEngine::default();
        let first = engine.analyze_blocking(AI_TEXT);
        let second = engine.analyze_blocking(AI_TEXT);
        assert_eq!(first.score, second.score);
        assert_eq!(first.classification, second.classification);
    }

    #[test]
    fn test_score_rounded_to_four_places() {
        let engine = AnalysisEngine::default();
        let result = engine.analyze_blocking(HUMAN_TEXT);
        let scaled = result.score * 10_000.0;
        assert!((scaled - scaled.round()).abs() < 1e-6);
    }
}
