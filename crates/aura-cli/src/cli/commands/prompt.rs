use crate::cli::args::{PromptArgs, PromptKind};
use crate::exit_codes;
use aura_core::hypothesis::build_hypothesis_prompt;
use aura_core::judge::build_prompt;

pub fn run(args: PromptArgs) -> anyhow::Result<i32> {
    let prompt = match args.kind {
        PromptKind::Rubric {
            question,
            reference,
            response,
        } => build_prompt(&question, &reference, &response),
        PromptKind::Hypothesis { question, response } => {
            build_hypothesis_prompt(&question, &response)
        }
    };
    println!("{}", prompt);
    Ok(exit_codes::SUCCESS)
}
