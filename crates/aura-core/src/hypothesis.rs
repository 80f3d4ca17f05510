use crate::providers::llm::LlmClient;
use std::sync::Arc;

const INSTRUCTION: &str = "Given the following question and response, generate a hypothesis that combines the information from 
both. The hypothesis should be a clear, standalone statement that can be evaluated against audio
content. Ensure the hypothesis captures all relevant details, especially when the response is 
complex or detailed.";

/// (question, response, hypothesis): detail-preserving, technical-detail, negation.
pub const WORKED_EXAMPLES: [(&str, &str, &str); 3] = [
    (
        "Is there a dog barking in the audio?",
        "Yes, there is a dog barking loudly in the background, and you can hear the dog's paws tapping\non the ground.",
        "A dog is barking loudly in the background, and its paws can be heard tapping on the ground.",
    ),
    (
        "What kind of vehicle can you hear?",
        "I can hear a motorcycle engine revving, and there is a high-pitched whine indicating it's a\nsport motorcycle.",
        "A sport motorcycle engine is revving, producing a high-pitched whine.",
    ),
    (
        "Are people talking?",
        "No, there are no voices or speech in the audio.",
        "No people are talking in the audio",
    ),
];

const CLOSING: &str = "Generate a hypothesis that represents what should be true in the audio based on this question-response 
pair. Return only the hypothesis statement without any prefixes or explanations.";

pub fn build_hypothesis_prompt(question: &str, response: &str) -> String {
    let mut prompt = String::from(INSTRUCTION);
    prompt.push_str("\n\n");
    for (q, r, h) in WORKED_EXAMPLES {
        prompt.push_str(&format!("Question: {}\nResponse: {}\nHypothesis: {}\n\n", q, r, h));
    }
    prompt.push_str(&format!(
        "Now, for the following:\nQuestion: {}\nResponse: {}\nHypothesis:\n\n{}",
        question, response, CLOSING
    ));
    prompt
}

/// Rewrites a question/response pair into one declarative sentence.
#[derive(Clone)]
pub struct HypothesisGenerator {
    client: Arc<dyn LlmClient>,
}

impl HypothesisGenerator {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    /// The trimmed reply, unvalidated. An empty reply is returned as-is.
    pub async fn generate(&self, question: &str, response: &str) -> anyhow::Result<String> {
        let prompt = build_hypothesis_prompt(question, response);
        let resp = self.client.complete(&prompt).await?;
        let hypothesis = resp.text.trim().to_string();
        if hypothesis.is_empty() {
            tracing::warn!("hypothesis generator returned an empty reply");
        }
        tracing::debug!(%hypothesis, "generated hypothesis");
        Ok(hypothesis)
    }
}
