// External Collaborators
// Optional network-backed helpers: an LLM meta-detector that joins the
// signal fusion, and a remote paraphraser for the rewrite pipeline

use crate::models::SignalResult;
use crate::services::config_store::EngineConfig;
use crate::services::text_primitives::clamp01;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

/// A detection signal living outside the process. Failures return `None`
/// so fusion can renormalize the remaining weights.
#[async_trait]
pub trait ExternalSignal: Send + Sync {
    /// Breakdown key and weight-table key for this signal.
    fn name(&self) -> &str;
    async fn analyze(&self, text: &str) -> Option<SignalResult>;
}

/// A sentence rewriter living outside the process. `None` tells the
/// caller to fall back to the rule-based rewrite.
#[async_trait]
pub trait Paraphraser: Send + Sync {
    async fn rewrite(&self, sentence: &str) -> Option<String>;
}

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Missing content in response")]
    MissingContent,
    #[error("No JSON object in response")]
    MissingJson,
    #[error("JSON parse error: {0}")]
    Json(String),
}

const META_DETECTOR_PROMPT: &str = "Analyze this text for AI-generation indicators. For each dimension, provide a score from 0 to 1 where 0 means definitely human-written and 1 means definitely AI-generated.\n\nDimensions:\n1. vocabulary_predictability - How predictable/generic is the word choice?\n2. syntactic_uniformity - How uniform/templated are the sentence structures?\n3. semantic_coherence_pattern - Does it follow an overly logical/structured flow?\n4. discourse_marker_usage - Overuse of transitions like \"moreover\", \"furthermore\"?\n5. creativity_indicators - Lack of genuine creativity, humor, personal voice?\n\nReturn ONLY valid JSON with this exact structure:\n{\"vocabulary_predictability\": 0.0, \"syntactic_uniformity\": 0.0, \"semantic_coherence_pattern\": 0.0, \"discourse_marker_usage\": 0.0, \"creativity_indicators\": 0.0}";

const EXCERPT_CHARS: usize = 4000;

#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: i32,
    temperature: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    choices: Option<Vec<ChatChoice>>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessageBody>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatMessageBody {
    content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct DimensionScores {
    vocabulary_predictability: f64,
    syntactic_uniformity: f64,
    semantic_coherence_pattern: f64,
    discourse_marker_usage: f64,
    creativity_indicators: f64,
}

/// Extract the outermost JSON object from model output.
fn extract_json(content: &str) -> Result<String, RemoteError> {
    let content = content.trim();
    if content.starts_with('{') {
        return Ok(content.to_string());
    }
    match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if end > start => Ok(content[start..=end].to_string()),
        _ => Err(RemoteError::MissingJson),
    }
}

async fn call_chat(
    client: &Client,
    endpoint: &str,
    api_key: &str,
    request: &ChatRequest,
) -> Result<String, RemoteError> {
    let response = client
        .post(endpoint)
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .json(request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(RemoteError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let data: ChatResponse = response.json().await?;
    data.choices
        .and_then(|mut c| c.drain(..).next())
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .ok_or(RemoteError::MissingContent)
}

fn char_excerpt(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

// ============================================================================
// Meta-detector signal
// ============================================================================

/// LLM-backed eighth signal scoring five qualitative dimensions.
pub struct MetaDetector {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl MetaDetector {
    pub fn new(endpoint: String, api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint,
            api_key,
            model,
        }
    }

    /// Build from config; `None` when the collaborator is absent, disabled
    /// or missing its endpoint.
    pub fn from_config(config: &EngineConfig) -> Option<Self> {
        let collab = config.collaborators.get("metaDetector")?;
        if !collab.enabled {
            return None;
        }
        let endpoint = collab.base_url.clone()?;
        let api_key = config.api_keys.get("metaDetector").cloned().unwrap_or_default();
        let model = collab
            .model
            .clone()
            .unwrap_or_else(|| "gpt-4o-mini".to_string());
        Some(Self::new(endpoint, api_key, model))
    }

    async fn request_scores(&self, text: &str) -> Result<DimensionScores, RemoteError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: META_DETECTOR_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!(
                        "Text to analyze:\n\"\"\"\n{}\n\"\"\"",
                        char_excerpt(text, EXCERPT_CHARS)
                    ),
                },
            ],
            max_tokens: 256,
            temperature: 0.0,
        };

        let content = call_chat(&self.client, &self.endpoint, &self.api_key, &request).await?;
        let json_str = extract_json(&content)?;
        serde_json::from_str(&json_str).map_err(|e| RemoteError::Json(e.to_string()))
    }
}

#[async_trait]
impl ExternalSignal for MetaDetector {
    fn name(&self) -> &str {
        "metaDetector"
    }

    async fn analyze(&self, text: &str) -> Option<SignalResult> {
        match self.request_scores(text).await {
            Ok(scores) => {
                let composite = clamp01(
                    scores.vocabulary_predictability * 0.20
                        + scores.syntactic_uniformity * 0.20
                        + scores.semantic_coherence_pattern * 0.20
                        + scores.discourse_marker_usage * 0.20
                        + scores.creativity_indicators * 0.20,
                );
                Some(SignalResult {
                    score: composite,
                    details: HashMap::from([
                        ("vocabularyPredictability".to_string(), json!(scores.vocabulary_predictability)),
                        ("syntacticUniformity".to_string(), json!(scores.syntactic_uniformity)),
                        ("semanticCoherencePattern".to_string(), json!(scores.semantic_coherence_pattern)),
                        ("discourseMarkerUsage".to_string(), json!(scores.discourse_marker_usage)),
                        ("creativityIndicators".to_string(), json!(scores.creativity_indicators)),
                    ]),
                })
            }
            Err(e) => {
                warn!("[META_DETECTOR] unavailable: {}", e);
                None
            }
        }
    }
}

// ============================================================================
// Remote paraphraser
// ============================================================================

/// LLM-backed paraphraser used ahead of the rule-based fallback.
pub struct RemoteParaphraser {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl RemoteParaphraser {
    pub fn new(endpoint: String, api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(20))
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint,
            api_key,
            model,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Option<Self> {
        let collab = config.collaborators.get("paraphraser")?;
        if !collab.enabled {
            return None;
        }
        let endpoint = collab.base_url.clone()?;
        let api_key = config.api_keys.get("paraphraser").cloned().unwrap_or_default();
        let model = collab
            .model
            .clone()
            .unwrap_or_else(|| "gpt-4o-mini".to_string());
        Some(Self::new(endpoint, api_key, model))
    }
}

#[async_trait]
impl Paraphraser for RemoteParaphraser {
    async fn rewrite(&self, sentence: &str) -> Option<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: "Paraphrase the user's sentence in a natural human register. Keep the meaning intact. Return only the rewritten sentence, nothing else.".to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: sentence.to_string(),
                },
            ],
            max_tokens: 256,
            temperature: 0.9,
        };

        match call_chat(&self.client, &self.endpoint, &self.api_key, &request).await {
            Ok(content) => {
                let cleaned = content.trim().trim_matches('"').trim().to_string();
                if cleaned.is_empty() {
                    None
                } else {
                    Some(cleaned)
                }
            }
            Err(e) => {
                warn!("[PARAPHRASE] remote paraphraser failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::config_store::CollaboratorConfig;

    #[test]
    fn test_extract_json_variants() {
        assert_eq!(extract_json(r#"{"a":1}"#).unwrap(), r#"{"a":1}"#);
        assert_eq!(
            extract_json("Here you go:\n```json\n{\"a\":1}\n```").unwrap(),
            r#"{"a":1}"#
        );
        assert!(extract_json("no braces at all").is_err());
    }

    #[test]
    fn test_dimension_scores_parse() {
        let raw = r#"{"vocabulary_predictability": 0.8, "syntactic_uniformity": 0.7, "semantic_coherence_pattern": 0.6, "discourse_marker_usage": 0.9, "creativity_indicators": 0.5}"#;
        let scores: DimensionScores = serde_json::from_str(raw).unwrap();
        assert!((scores.discourse_marker_usage - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_from_config_requires_enabled_and_url() {
        let mut config = EngineConfig::default();
        assert!(MetaDetector::from_config(&config).is_none());

        config.collaborators.insert(
            "metaDetector".to_string(),
            CollaboratorConfig {
                enabled: false,
                model: None,
                base_url: Some("http://localhost:9000/v1/chat".to_string()),
            },
        );
        assert!(MetaDetector::from_config(&config).is_none());

        config.collaborators.get_mut("metaDetector").unwrap().enabled = true;
        assert!(MetaDetector::from_config(&config).is_some());
    }

    #[test]
    fn test_prompt_names_every_dimension() {
        for dim in [
            "vocabulary_predictability",
            "syntactic_uniformity",
            "semantic_coherence_pattern",
            "discourse_marker_usage",
            "creativity_indicators",
        ] {
            assert!(META_DETECTOR_PROMPT.contains(dim));
        }
    }
}
