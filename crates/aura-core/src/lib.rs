pub mod config;
pub mod entailment;
pub mod errors;
pub mod fusion;
pub mod hypothesis;
pub mod judge;
pub mod model;
pub mod providers;

pub use fusion::{compute_aura_score, AuraScorer, FusionMode, FusionParams};
pub use model::{AuraResult, EvaluationRequest};
