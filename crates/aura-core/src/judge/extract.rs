//! Score extraction from free-form judge replies.
//!
//! Strategies run in a fixed order and the first match wins. A reply that
//! matches nothing scores 1.

use super::{Judgment, RubricScore};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// `{ ... }` fragment between the first `{` and the last `}`.
    Structured,
    /// Literal `"score": v` / `"score":v`.
    ScoreField,
    /// Case-insensitive `score is v`.
    ScorePhrase,
    /// Nothing matched.
    Default,
}

type Attempt = fn(&str) -> Option<(RubricScore, Option<String>)>;

const CHAIN: &[(ExtractionStrategy, Attempt)] = &[
    (ExtractionStrategy::Structured, structured as Attempt),
    (ExtractionStrategy::ScoreField, score_field as Attempt),
    (ExtractionStrategy::ScorePhrase, score_phrase as Attempt),
];

pub fn extract_judgment(text: &str) -> Judgment {
    for (strategy, attempt) in CHAIN {
        if let Some((score, reason)) = attempt(text) {
            return Judgment {
                score,
                reason,
                strategy: *strategy,
            };
        }
    }
    tracing::warn!("no score found in judge reply; defaulting to {}", RubricScore::Incorrect);
    Judgment {
        score: RubricScore::Incorrect,
        reason: None,
        strategy: ExtractionStrategy::Default,
    }
}

pub fn extract_score(text: &str) -> RubricScore {
    extract_judgment(text).score
}

fn structured(text: &str) -> Option<(RubricScore, Option<String>)> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    let fragment = &text[start..=end];

    // Judges asked for a "dictionary" sometimes answer with single quotes;
    // a YAML flow mapping accepts both forms.
    let value: serde_json::Value = serde_json::from_str(fragment)
        .ok()
        .or_else(|| serde_yaml::from_str(fragment).ok())?;
    let obj = value.as_object()?;

    let score = obj.get("score").and_then(coerce_int)?;
    let reason = obj
        .get("reason")
        .and_then(|r| r.as_str())
        .map(str::to_string);
    Some((RubricScore::clamped(score), reason))
}

fn coerce_int(v: &serde_json::Value) -> Option<i64> {
    match v {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn score_field(text: &str) -> Option<(RubricScore, Option<String>)> {
    RubricScore::ALL.into_iter().find_map(|score| {
        let v = score.value();
        let spaced = format!("\"score\": {}", v);
        let tight = format!("\"score\":{}", v);
        (text.contains(&spaced) || text.contains(&tight)).then_some((score, None))
    })
}

fn score_phrase(text: &str) -> Option<(RubricScore, Option<String>)> {
    let lower = text.to_lowercase();
    RubricScore::ALL.into_iter().find_map(|score| {
        lower
            .contains(&format!("score is {}", score.value()))
            .then_some((score, None))
    })
}
