// Configuration Storage Service
// Handles engine config read/write and version backup

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

/// Relative weight per detection signal, keyed by signal name.
/// Stored sparsely; unlisted signals weigh 0 at fusion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightConfig(pub BTreeMap<String, f64>);

impl Default for WeightConfig {
    fn default() -> Self {
        Self(BTreeMap::from([
            ("statistical".to_string(), 0.18),
            ("linguistic".to_string(), 0.18),
            ("sentenceLevel".to_string(), 0.16),
            ("stylometric".to_string(), 0.12),
            ("coherence".to_string(), 0.10),
            ("fingerprint".to_string(), 0.16),
            ("readabilityForensics".to_string(), 0.10),
        ]))
    }
}

impl WeightConfig {
    /// Weight for a signal, 0.0 when the signal is not configured.
    pub fn get(&self, name: &str) -> f64 {
        self.0.get(name).copied().unwrap_or(0.0)
    }

    /// Defaults with the given entries layered on top.
    pub fn with_overrides(overrides: BTreeMap<String, f64>) -> Self {
        let mut weights = Self::default();
        weights.0.extend(overrides);
        weights
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionThresholds {
    /// Scores strictly below this classify as HUMAN.
    #[serde(default = "default_human_below")]
    pub human_below: f64,
    /// Scores at or above this classify as AI; in between is MIXED.
    #[serde(default = "default_ai_at_or_above")]
    pub ai_at_or_above: f64,
    /// Per-sentence scores above this are flagged during verification.
    #[serde(default = "default_sentence_flag")]
    pub sentence_flag_above: f64,
    /// Verification passes when the whole-text score is at or below this.
    #[serde(default = "default_verify_pass")]
    pub verify_pass_at_or_below: f64,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            human_below: 0.35,
            ai_at_or_above: 0.65,
            sentence_flag_above: 0.6,
            verify_pass_at_or_below: 0.35,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteTuning {
    /// Share of eligible sentences sent through the paraphraser.
    #[serde(default = "default_paraphrase_coverage")]
    pub paraphrase_coverage: f64,
    /// Longest acceptable paraphrase, as a multiple of the input length.
    #[serde(default = "default_max_growth")]
    pub paraphrase_max_growth: f64,
    #[serde(default = "default_burstiness")]
    pub burstiness: f64,
    #[serde(default = "default_parenthetical")]
    pub parenthetical: f64,
    #[serde(default = "default_question")]
    pub rhetorical_question: f64,
    #[serde(default = "default_hedging")]
    pub hedging: f64,
    #[serde(default = "default_fragment")]
    pub fragment: f64,
    #[serde(default = "default_idiom")]
    pub idiom: f64,
}

impl Default for RewriteTuning {
    fn default() -> Self {
        Self {
            paraphrase_coverage: 0.6,
            paraphrase_max_growth: 3.0,
            burstiness: 0.15,
            parenthetical: 0.08,
            rhetorical_question: 0.2,
            hedging: 0.08,
            fragment: 0.25,
            idiom: 0.12,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorConfig {
    pub enabled: bool,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    pub version: String,
    #[serde(default)]
    pub weights: WeightConfig,
    #[serde(default)]
    pub thresholds: DecisionThresholds,
    #[serde(default)]
    pub rewrite: RewriteTuning,
    #[serde(default)]
    pub collaborators: HashMap<String, CollaboratorConfig>,
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
}

fn default_human_below() -> f64 { 0.35 }
fn default_ai_at_or_above() -> f64 { 0.65 }
fn default_sentence_flag() -> f64 { 0.6 }
fn default_verify_pass() -> f64 { 0.35 }
fn default_paraphrase_coverage() -> f64 { 0.6 }
fn default_max_growth() -> f64 { 3.0 }
fn default_burstiness() -> f64 { 0.15 }
fn default_parenthetical() -> f64 { 0.08 }
fn default_question() -> f64 { 0.2 }
fn default_hedging() -> f64 { 0.08 }
fn default_fragment() -> f64 { 0.25 }
fn default_idiom() -> f64 { 0.12 }

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join("config.json");
        Self { config_dir, config_file }
    }

    /// Get default config directory
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("veriprose"))
    }

    /// Ensure config directory exists
    pub fn ensure_dir(&self) -> Result<(), String> {
        fs::create_dir_all(&self.config_dir)
            .map_err(|e| format!("Failed to create config dir: {}", e))
    }

    /// Load configuration from file
    pub fn load(&self) -> Result<EngineConfig, String> {
        if !self.config_file.exists() {
            return Ok(EngineConfig::default());
        }

        let content = fs::read_to_string(&self.config_file)
            .map_err(|e| format!("Failed to read config: {}", e))?;

        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config: {}", e))
    }

    /// Save configuration to file
    pub fn save(&self, config: &EngineConfig) -> Result<(), String> {
        self.ensure_dir()?;

        // Create backup if file exists
        if self.config_file.exists() {
            self.create_backup()?;
        }

        let content = serde_json::to_string_pretty(config)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(&self.config_file, content)
            .map_err(|e| format!("Failed to write config: {}", e))
    }

    /// Create a backup of current config
    fn create_backup(&self) -> Result<(), String> {
        let backup_dir = self.config_dir.join("backups");
        fs::create_dir_all(&backup_dir)
            .map_err(|e| format!("Failed to create backup dir: {}", e))?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let backup_file = backup_dir.join(format!("config_{}.json", timestamp));

        fs::copy(&self.config_file, &backup_file)
            .map_err(|e| format!("Failed to create backup: {}", e))?;

        // Keep only last 10 backups
        self.cleanup_old_backups(&backup_dir, 10)?;

        Ok(())
    }

    /// Remove old backups, keeping only the most recent N
    fn cleanup_old_backups(&self, backup_dir: &PathBuf, keep: usize) -> Result<(), String> {
        let mut entries: Vec<_> = fs::read_dir(backup_dir)
            .map_err(|e| format!("Failed to read backup dir: {}", e))?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map_or(false, |ext| ext == "json"))
            .collect();

        if entries.len() <= keep {
            return Ok(());
        }

        // Sort by modification time (oldest first)
        entries.sort_by_key(|e| {
            e.metadata()
                .and_then(|m| m.modified())
                .unwrap_or(std::time::SystemTime::UNIX_EPOCH)
        });

        // Remove oldest entries
        for entry in entries.iter().take(entries.len() - keep) {
            let _ = fs::remove_file(entry.path());
        }

        Ok(())
    }

    /// Get collaborator API key from config file
    pub fn get_api_key(&self, collaborator: &str) -> Result<Option<String>, String> {
        let config = self.load()?;
        Ok(config.api_keys.get(collaborator).cloned())
    }

    /// Store collaborator API key in config file
    pub fn set_api_key(&self, collaborator: &str, key: &str) -> Result<(), String> {
        let mut config = self.load()?;
        config.api_keys.insert(collaborator.to_string(), key.to_string());
        self.save(&config)
    }

    /// Get collaborator base URL from config file
    pub fn get_collaborator_url(&self, collaborator: &str) -> Result<Option<String>, String> {
        let config = self.load()?;
        Ok(config
            .collaborators
            .get(collaborator)
            .and_then(|c| c.base_url.clone()))
    }

    /// Set collaborator base URL in config file
    pub fn set_collaborator_url(&self, collaborator: &str, url: &str) -> Result<(), String> {
        let mut config = self.load()?;
        let entry = config.collaborators.entry(collaborator.to_string()).or_default();
        entry.base_url = Some(url.to_string());
        self.save(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = WeightConfig::default();
        let total: f64 = weights.0.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(weights.0.len(), 7);
    }

    #[test]
    fn test_weight_lookup_missing_is_zero() {
        let weights = WeightConfig::default();
        assert_eq!(weights.get("nonexistent"), 0.0);
        assert!((weights.get("statistical") - 0.18).abs() < 1e-9);
    }

    #[test]
    fn test_with_overrides_keeps_unlisted_defaults() {
        let weights =
            WeightConfig::with_overrides(BTreeMap::from([("coherence".to_string(), 0.5)]));
        assert!((weights.get("coherence") - 0.5).abs() < 1e-9);
        assert!((weights.get("linguistic") - 0.18).abs() < 1e-9);
    }

    #[test]
    fn test_default_thresholds() {
        let t = DecisionThresholds::default();
        assert!((t.human_below - 0.35).abs() < 1e-9);
        assert!((t.ai_at_or_above - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_config_serialization() {
        let config = EngineConfig {
            version: "1.0.0".to_string(),
            ..EngineConfig::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.version, "1.0.0");
        assert_eq!(parsed.weights, WeightConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: EngineConfig =
            serde_json::from_str(r#"{"version":"2","weights":{"statistical":1.0}}"#).unwrap();
        assert!((parsed.weights.get("statistical") - 1.0).abs() < 1e-9);
        assert_eq!(parsed.weights.get("linguistic"), 0.0);
        assert!((parsed.thresholds.verify_pass_at_or_below - 0.35).abs() < 1e-9);
    }
}
