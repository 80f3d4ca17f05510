use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::entailment::EntailmentOutcome;
use crate::fusion::FusionMode;
use crate::judge::Judgment;

/// One audio question-answering response to be scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub question: String,
    pub reference_answer: String,
    pub predicted_response: String,
    /// Opaque beyond an existence check.
    pub audio_reference: PathBuf,
}

impl EvaluationRequest {
    pub fn new(
        question: impl Into<String>,
        reference_answer: impl Into<String>,
        predicted_response: impl Into<String>,
        audio_reference: impl Into<PathBuf>,
    ) -> Self {
        Self {
            question: question.into(),
            reference_answer: reference_answer.into(),
            predicted_response: predicted_response.into(),
            audio_reference: audio_reference.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
}

/// Final output of one evaluation. Only `aura_score` is part of the stable contract;
/// the remaining fields describe how it was reached.
#[derive(Debug, Clone, Serialize)]
pub struct AuraResult {
    pub aura_score: f64,
    pub mode: FusionMode,
    pub rubric: Judgment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hypothesis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entailment: Option<EntailmentOutcome>,
}
