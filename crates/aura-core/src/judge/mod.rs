pub mod extract;
pub mod prompt;

use crate::providers::llm::LlmClient;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub use extract::{extract_judgment, extract_score, ExtractionStrategy};
pub use prompt::{build_prompt, FewShotExample, FEW_SHOT_EXAMPLES};

/// Discrete correctness judgment: 1 incorrect, 2 ambiguous/incomplete, 3 correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum RubricScore {
    Incorrect = 1,
    Ambiguous = 2,
    Correct = 3,
}

impl RubricScore {
    pub const ALL: [RubricScore; 3] = [
        RubricScore::Incorrect,
        RubricScore::Ambiguous,
        RubricScore::Correct,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    /// Maps {1,2,3} onto {0, 0.5, 1}.
    pub fn normalized(self) -> f64 {
        (f64::from(self.value()) - 1.0) / 2.0
    }

    /// Out-of-range integers are pulled to the nearest end of the scale.
    pub fn clamped(v: i64) -> Self {
        match v {
            i64::MIN..=1 => RubricScore::Incorrect,
            2 => RubricScore::Ambiguous,
            _ => RubricScore::Correct,
        }
    }
}

impl From<RubricScore> for u8 {
    fn from(s: RubricScore) -> u8 {
        s.value()
    }
}

impl TryFrom<u8> for RubricScore {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(RubricScore::Incorrect),
            2 => Ok(RubricScore::Ambiguous),
            3 => Ok(RubricScore::Correct),
            other => Err(format!("rubric score must be 1, 2 or 3 (got {})", other)),
        }
    }
}

impl fmt::Display for RubricScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Judgment {
    pub score: RubricScore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub strategy: ExtractionStrategy,
}

/// Few-shot rubric judge. One completion per call, no retries.
#[derive(Clone)]
pub struct RubricJudge {
    client: Arc<dyn LlmClient>,
}

impl RubricJudge {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub async fn judge(
        &self,
        question: &str,
        reference_answer: &str,
        predicted_answer: &str,
    ) -> anyhow::Result<Judgment> {
        let prompt = build_prompt(question, reference_answer, predicted_answer);
        let resp = self.client.complete(&prompt).await?;
        let judgment = extract_judgment(&resp.text);
        tracing::debug!(
            score = judgment.score.value(),
            strategy = ?judgment.strategy,
            provider = %resp.provider,
            "rubric judgment"
        );
        Ok(judgment)
    }

    pub async fn score(
        &self,
        question: &str,
        reference_answer: &str,
        predicted_answer: &str,
    ) -> anyhow::Result<RubricScore> {
        Ok(self
            .judge(question, reference_answer, predicted_answer)
            .await?
            .score)
    }
}
