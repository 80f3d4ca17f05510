use std::fmt::Write as _;

/// One worked scoring example shown to the judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FewShotExample {
    pub question: &'static str,
    pub reference_answer: &'static str,
    pub candidate_answer: &'static str,
    pub score: u8,
    pub reason: &'static str,
}

const CORRECT: &str =
    "The candidate answer is correct because it is equivalent to the reference answer";
const AMBIGUOUS: &str = "The candidate answer is ambiguous";
const INCORRECT: &str =
    "The candidate answer is incorrect because it contradicts the reference answer";

/// Ordered: correct, then ambiguous, then incorrect.
pub static FEW_SHOT_EXAMPLES: &[FewShotExample] = &[
    FewShotExample {
        question: "Is the source of the sound indoors?",
        reference_answer: "yes",
        candidate_answer: "Yes, the audio suggests that the source is inside a room or building, as indicated by the consistent bouncing sounds and lack of external noise like wind.",
        score: 3,
        reason: CORRECT,
    },
    FewShotExample {
        question: "What can you infer about the weather conditions when this audio was recorded?",
        reference_answer: "There was wind blowing during the recording.",
        candidate_answer: "The presence of wind noise suggests that it might be a breezy or windy day, possibly in an outdoor setting near water.",
        score: 3,
        reason: CORRECT,
    },
    FewShotExample {
        question: "Is there a dog barking in the audio?",
        reference_answer: "yes",
        candidate_answer: "there is a dog barking",
        score: 3,
        reason: CORRECT,
    },
    FewShotExample {
        question: "Does the motor stop?",
        reference_answer: "No.",
        candidate_answer: "The audio does not provide information about whether the motor stops or continues running",
        score: 2,
        reason: AMBIGUOUS,
    },
    FewShotExample {
        question: "is the sound scary?",
        reference_answer: "no",
        candidate_answer: "The continuous roar of a running engine and the thunderstorm might be perceived as intense or dramatic, but it depends on individual perceptions and experiences.",
        score: 2,
        reason: AMBIGUOUS,
    },
    FewShotExample {
        question: "What acoustic features in the audio clip indicate that a machine is running?",
        reference_answer: "The loud sound in the audio clip indicates that a machine is running.",
        candidate_answer: "The continuous humming sound indicates the operation of a machine, likely an engine or motor.",
        score: 2,
        reason: "The candidate answer is ambiguous because while it is one possible answer, it is incomplete",
    },
    FewShotExample {
        question: "Are people talking?",
        reference_answer: "no",
        candidate_answer: "Yes, there is a faint sound of human speech in the audio.",
        score: 1,
        reason: INCORRECT,
    },
    FewShotExample {
        question: "Is someone coughing?",
        reference_answer: "no",
        candidate_answer: "Yes, a person is coughing in the audio.",
        score: 1,
        reason: INCORRECT,
    },
    FewShotExample {
        question: "What kind of sound do you hear in the background?",
        reference_answer: "Bird chirping",
        candidate_answer: "The background sound is a vehicle passing by, which suggests that the scene takes place near a road or path.",
        score: 1,
        reason: INCORRECT,
    },
];

const RUBRIC: &str = "You are given a question, a reference answer written by experts, and a candidate answer. \
Please rate the accuracy of the candidate answer for the question considering the reference answer.

Use a scale of 1-3, with 1 indicating an incorrect or irrelevant answer, 2 indicating an ambiguous or \
incomplete answer, and 3 indicating a correct answer.";

pub fn build_prompt(question: &str, reference_answer: &str, predicted_answer: &str) -> String {
    let mut prompt = String::with_capacity(4096);
    prompt.push_str(RUBRIC);
    prompt.push_str("\n\nHere are some examples:\n");

    for ex in FEW_SHOT_EXAMPLES {
        // Writing into a String cannot fail.
        let _ = write!(
            prompt,
            "\nQuestion: {}\nReference answer: {}\nCandidate answer: {}\n\
             Output: The candidate answer is {} and therefore the score is {}.\n",
            ex.question, ex.reference_answer, ex.candidate_answer, ex.reason, ex.score
        );
    }

    let _ = write!(
        prompt,
        "\nNow evaluate the following: Here is the question: {}, the reference answer is: {}, \
         and the candidate answer is: {}.\n\
         Give the rationale before rating. Format your response as a dictionary with a key \"score\", \
         value either 1, 2 or 3 and a key \"reason\" with a string value explaining your assessment.\n",
        question, reference_answer, predicted_answer
    );
    prompt
}
