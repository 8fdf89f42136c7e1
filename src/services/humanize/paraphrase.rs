// Paraphrase Stage
// Remote collaborator with readiness lifecycle, plus the rule-based
// fallback that keeps the stage fully local when no remote is available

use crate::services::analysis::external::Paraphraser;
use crate::services::config_store::RewriteTuning;
use crate::services::lexicon::{opener_prefix_re, SENTENCE_OPENERS};
use crate::services::text_primitives::{capitalize_first, lowercase_first, split_end_punct};
use rand::Rng;
use regex::Regex;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

const READY_WAIT: Duration = Duration::from_secs(2);
const REMOTE_CALL_TIMEOUT: Duration = Duration::from_secs(25);

/// Lifecycle of the paraphrase collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParaphraseState {
    NotLoaded,
    Loading,
    Ready,
    Failed,
}

/// Shared handle for the optional remote paraphraser. The pipeline waits
/// briefly for readiness and otherwise runs rule-based only.
///
/// The receiver half stays in the struct so state updates are stored even
/// while nobody is waiting.
pub struct ParaphraseResource {
    remote: Mutex<Option<Arc<dyn Paraphraser>>>,
    state_tx: watch::Sender<ParaphraseState>,
    state_rx: watch::Receiver<ParaphraseState>,
}

impl ParaphraseResource {
    pub fn new() -> Self {
        let (state_tx, state_rx) = watch::channel(ParaphraseState::NotLoaded);
        Self {
            remote: Mutex::new(None),
            state_tx,
            state_rx,
        }
    }

    /// Resource that is ready from the start.
    pub fn with_remote(remote: Arc<dyn Paraphraser>) -> Self {
        let resource = Self::new();
        resource.install(remote);
        resource
    }

    pub fn state(&self) -> ParaphraseState {
        *self.state_rx.borrow()
    }

    /// Mark the collaborator as loading (e.g. while probing its endpoint).
    pub fn begin_loading(&self) {
        let _ = self.state_tx.send(ParaphraseState::Loading);
    }

    pub fn install(&self, remote: Arc<dyn Paraphraser>) {
        if let Ok(mut slot) = self.remote.lock() {
            *slot = Some(remote);
        }
        let _ = self.state_tx.send(ParaphraseState::Ready);
        info!("[PARAPHRASE] remote collaborator ready");
    }

    pub fn fail(&self, reason: &str) {
        warn!("[PARAPHRASE] remote collaborator failed: {}", reason);
        let _ = self.state_tx.send(ParaphraseState::Failed);
    }

    /// Wait until the lifecycle settles or `wait` elapses. `true` only for
    /// `Ready`; `NotLoaded` resolves immediately as unavailable.
    pub async fn wait_ready(&self, wait: Duration) -> bool {
        let mut rx = self.state_rx.clone();
        let settled = tokio::time::timeout(wait, async move {
            loop {
                match *rx.borrow() {
                    ParaphraseState::Ready => return true,
                    ParaphraseState::Failed | ParaphraseState::NotLoaded => return false,
                    ParaphraseState::Loading => {}
                }
                if rx.changed().await.is_err() {
                    return false;
                }
            }
        });
        settled.await.unwrap_or(false)
    }

    fn remote(&self) -> Option<Arc<dyn Paraphraser>> {
        self.remote.lock().ok().and_then(|slot| slot.clone())
    }
}

impl Default for ParaphraseResource {
    fn default() -> Self {
        Self::new()
    }
}

/// Paraphrase a coverage-gated share of sentences. Short sentences pass
/// through verbatim so the text keeps some of its own rhythm.
pub async fn paraphrase_sentences<R: Rng>(
    resource: &ParaphraseResource,
    sentences: Vec<String>,
    tuning: &RewriteTuning,
    rng: &mut R,
) -> Vec<String> {
    let remote = if resource.wait_ready(READY_WAIT).await {
        resource.remote()
    } else {
        None
    };

    let mut out = Vec::with_capacity(sentences.len());
    for sentence in sentences {
        if rng.gen::<f64>() < tuning.paraphrase_coverage && sentence.trim().len() > 15 {
            let rewritten =
                paraphrase_one(remote.as_deref(), &sentence, tuning.paraphrase_max_growth, rng)
                    .await;
            out.push(rewritten);
        } else {
            out.push(sentence);
        }
    }
    out
}

async fn paraphrase_one<R: Rng>(
    remote: Option<&dyn Paraphraser>,
    sentence: &str,
    max_growth: f64,
    rng: &mut R,
) -> String {
    if let Some(remote) = remote {
        match tokio::time::timeout(REMOTE_CALL_TIMEOUT, remote.rewrite(sentence)).await {
            Ok(Some(output)) => {
                let output = output.trim();
                // Plausibility gate on the remote output
                if output.len() > 10 && (output.len() as f64) < sentence.len() as f64 * max_growth
                {
                    return output.to_string();
                }
            }
            Ok(None) => {}
            Err(_) => warn!("[PARAPHRASE] remote call timed out"),
        }
    }

    let rewritten = rule_based_paraphrase(sentence, rng);
    if rewritten != sentence {
        rewritten
    } else {
        reorder_fallback(sentence, rng)
    }
}

fn is_verb_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(.{10,}?)\s+(?:is|are|was|were)\s+(.{10,})$").expect("copula regex")
    })
}

fn copula_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(?:is|are|was|were)\b").expect("copula token regex"))
}

/// Rule-based paraphrase with five weighted strategies. Sentences under
/// 15 characters pass through untouched.
pub fn rule_based_paraphrase<R: Rng>(sentence: &str, rng: &mut R) -> String {
    if sentence.trim().len() < 15 {
        return sentence.to_string();
    }

    let roll = rng.gen::<f64>();

    // Strategy 1: swap clauses around the first comma
    if roll < 0.3 {
        if let Some(comma) = sentence.find(", ") {
            if comma > 12 && comma + 12 < sentence.len() {
                return swap_clauses(sentence, comma);
            }
        }
        return sentence.to_string();
    }

    // Strategy 2: prepend a sentence opener
    if roll < 0.55 {
        if opener_prefix_re().is_match(sentence) {
            return sentence.to_string();
        }
        let opener = SENTENCE_OPENERS[rng.gen_range(0..SENTENCE_OPENERS.len())];
        return format!("{}{}", opener, lowercase_first(sentence));
    }

    // Strategy 3: recast "X is Y" as an observation. The verb slot takes the
    // first copula anywhere in the sentence, which can sit inside the subject.
    if roll < 0.7 {
        if let Some(caps) = is_verb_re().captures(sentence) {
            let subject = caps.get(1).map_or("", |m| m.as_str());
            let predicate = caps.get(2).map_or("", |m| m.as_str());
            let verb = copula_token_re().find(sentence).map_or("is", |m| m.as_str());
            let (clean_pred, punct) = split_end_punct(predicate);
            return format!(
                "What we see here is that {} {} {}{}",
                lowercase_first(subject),
                verb,
                clean_pred,
                punct
            );
        }
        return sentence.to_string();
    }

    // Strategy 4: split at the first interior conjunction
    if roll < 0.85 {
        for conj in [" and ", " but ", " yet ", " while "] {
            if let Some(idx) = sentence.find(conj) {
                if idx > 15 && idx + 15 < sentence.len() {
                    let (first, _) = split_end_punct(sentence[..idx].trim());
                    let second = sentence[idx + conj.len()..].trim();
                    let (clean_second, punct) = split_end_punct(second);
                    return format!(
                        "{}. {}{}",
                        first,
                        capitalize_first(clean_second),
                        punct
                    );
                }
            }
        }
        return sentence.to_string();
    }

    // Strategy 5: opener fallback for long plain sentences
    if sentence.split_whitespace().count() > 8
        && !sentence.contains('(')
        && !sentence.contains(" — ")
    {
        let opener = SENTENCE_OPENERS[rng.gen_range(0..SENTENCE_OPENERS.len())];
        return format!("{}{}", opener, lowercase_first(sentence));
    }
    sentence.to_string()
}

/// Secondary fallback: a coin-flip clause reorder with looser margins.
fn reorder_fallback<R: Rng>(sentence: &str, rng: &mut R) -> String {
    if let Some(comma) = sentence.find(", ") {
        if comma > 10 && comma + 10 < sentence.len() && rng.gen::<f64>() > 0.5 {
            return swap_clauses(sentence, comma);
        }
    }
    sentence.to_string()
}

fn swap_clauses(sentence: &str, comma: usize) -> String {
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
