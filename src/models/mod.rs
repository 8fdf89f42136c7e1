// Veriprose Data Models
// Shared result and option types for detection and humanization

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// Re-export WeightConfig so result payloads can echo the active weights
pub use crate::services::config_store::WeightConfig;

// ============ Signal Types ============

/// Output of a single detection signal: a score in [0, 1] where higher
/// means more AI-like, plus signal-specific diagnostic details.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SignalResult {
    pub score: f64,
    #[serde(default)]
    pub details: HashMap<String, serde_json::Value>,
}

// ============ Classification ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    Human,
    Mixed,
    Ai,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Human => "HUMAN",
            Classification::Mixed => "MIXED",
            Classification::Ai => "AI",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Analysis Result ============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceScore {
    pub text: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    pub text_length: usize,
    pub word_count: usize,
    pub processing_time_ms: u64,
    pub signals: usize,
    /// Version of the phrase and pattern tables the signals ran against.
    pub lexicon_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Fused score in [0, 1], rounded to 4 decimal places.
    pub score: f64,
    pub classification: Classification,
    /// Confidence in [0, 1], rounded to 2 decimal places.
    pub confidence: f64,
    /// Per-signal results, `None` for signals that failed or were skipped.
    pub breakdown: HashMap<String, Option<SignalResult>>,
    /// Renormalized weights over the signals that produced a score
    /// (sums to 1.0 when any signal succeeded), rounded to 3 decimals.
    pub effective_weights: HashMap<String, f64>,
    pub sentence_scores: Vec<SentenceScore>,
    /// The configured weights the caller asked for, echoed back.
    pub weights: WeightConfig,
    pub metadata: AnalysisMetadata,
}

// ============ Humanize Options ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HumanizeStyle {
    #[default]
    Natural,
    Casual,
    Academic,
    Creative,
}

impl HumanizeStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            HumanizeStyle::Natural => "natural",
            HumanizeStyle::Casual => "casual",
            HumanizeStyle::Academic => "academic",
            HumanizeStyle::Creative => "creative",
        }
    }
}

impl fmt::Display for HumanizeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Light,
    #[default]
    Medium,
    Heavy,
}

impl Intensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Light => "light",
            Intensity::Medium => "medium",
            Intensity::Heavy => "heavy",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanizeOptions {
    #[serde(default)]
    pub style: HumanizeStyle,
    #[serde(default)]
    pub intensity: Intensity,
    /// Upper bound on verification rewrite rounds (heavy intensity only).
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Seed for the rewrite RNG. `None` draws fresh entropy per run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Soft wall-clock budget in milliseconds. Stages already applied are
    /// kept; remaining stages are skipped once the budget is spent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_ms: Option<u64>,
}

impl Default for HumanizeOptions {
    fn default() -> Self {
        Self {
            style: HumanizeStyle::Natural,
            intensity: Intensity::Medium,
            max_iterations: 3,
            seed: None,
            deadline_ms: None,
        }
    }
}

// ============ Humanization Result ============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationOutcome {
    /// Whether the rewritten text scored at or below the pass threshold.
    pub passed: bool,
    pub score: f64,
    pub classification: Classification,
    pub confidence: f64,
    /// Sentences still scoring above the per-sentence flag threshold.
    pub flagged_sentences: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanizationResult {
    pub original: String,
    pub humanized: String,
    pub style: HumanizeStyle,
    pub intensity: Intensity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_verification: Option<VerificationOutcome>,
    pub stage_count: usize,
    pub processing_time_ms: u64,
}

// ============ Progress Events ============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub stage: String,
    pub detail: String,
    pub elapsed_ms: u64,
}

impl ProgressEvent {
    pub fn new(stage: &str, detail: impl Into<String>, elapsed_ms: u64) -> Self {
        Self {
            stage: stage.to_string(),
            detail: detail.into(),
            elapsed_ms,
        }
    }
}

// ============ Default Value Functions ============

fn default_max_iterations() -> u32 { 3 }
