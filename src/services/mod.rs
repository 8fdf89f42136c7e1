// Veriprose Core Services
// Detection signals, score fusion and the humanization pipeline

pub mod analysis;
pub mod config_store;
pub mod humanize;
pub mod lexicon;
pub mod text_primitives;

pub use config_store::*;
pub use text_primitives::*;

// Re-export the analysis and humanize entry points
pub use analysis::{
    classify_score,
    AnalysisEngine,
    ExternalSignal,
    MetaDetector,
    Paraphraser,
    RemoteError,
    RemoteParaphraser,
};
pub use humanize::{
    self_verify,
    Humanizer,
    OracleError,
    OracleReport,
    ParaphraseResource,
    ParaphraseState,
    VerificationOracle,
};
