// Analysis Module
// Multi-signal AI-text detection organized into specialized submodules:
// - statistical: Perplexity, burstiness, entropy and n-gram predictability
// - linguistic: Lexical diversity, structure variation, telltale phrasing
// - sentence_level: Per-sentence scoring plus cross-sentence coherence
// - stylometric: Punctuation, function words, Yule's K, word lengths
// - coherence: Topic consistency, paragraph regularity, semantic density
// - fingerprint: Known AI phrases, patterns and structural templates
// - readability: Cross-chunk consistency of readability formulas
// - external: Optional network collaborators (meta-detector, paraphraser)
// - engine: Weighted fusion, classification and the public entry points

pub mod coherence;
pub mod engine;
pub mod external;
pub mod fingerprint;
pub mod linguistic;
pub mod readability;
pub mod sentence_level;
pub mod statistical;
pub mod stylometric;

// Re-export the fusion entry points and signal functions
pub use coherence::analyze_coherence;
pub use engine::{classify_score, AnalysisEngine};
pub use external::{
    RemoteError,
    ExternalSignal,
    MetaDetector,
    Paraphraser,
    RemoteParaphraser,
};
pub use fingerprint::analyze_fingerprint;
pub use linguistic::analyze_linguistic;
pub use readability::analyze_readability_forensics;
pub use sentence_level::analyze_sentence_level;
pub use statistical::analyze_statistical;
pub use stylometric::analyze_stylometric;
