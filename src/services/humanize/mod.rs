// Humanize Module
// Self-verifying rewrite pipeline organized into specialized submodules:
// - pipeline: Stage ordering, deadline handling and the Humanizer entry point
// - paraphrase: Remote collaborator lifecycle plus rule-based fallback
// - synonym: Thesaurus-driven word replacement
// - rewriter: Structural transforms (voice, clause order, split/merge)
// - discourse: Formulaic transition and essay-scaffolding breakup
// - vocabulary: AI-flagged word swaps, contractions, creative transforms
// - perturb: Burstiness, asides and human imperfections
// - verifier: Oracle trait and the self-verification round

pub mod discourse;
pub mod paraphrase;
pub mod perturb;
pub mod pipeline;
pub mod rewriter;
pub mod synonym;
pub mod verifier;
pub mod vocabulary;

// Re-export the pipeline entry points and stage functions
pub use discourse::break_discourse_patterns;
pub use paraphrase::{rule_based_paraphrase, ParaphraseResource, ParaphraseState};
pub use perturb::apply_perturbations;
pub use pipeline::{parse_sentences, Humanizer, ParsedSentence};
pub use rewriter::rewrite_sentences;
pub use synonym::replace_with_synonyms;
pub use verifier::{self_verify, OracleError, OracleReport, VerificationOracle};
pub use vocabulary::enrich_vocabulary;
