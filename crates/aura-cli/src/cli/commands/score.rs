use super::builder::{build_llm, build_scorer, resolve_config};
use crate::cli::args::{OutputFormat, ScoreArgs};
use crate::exit_codes;
use aura_core::EvaluationRequest;

pub async fn run(args: ScoreArgs) -> anyhow::Result<i32> {
    let cfg = resolve_config(&args)?;
    tracing::debug!(config = ?cfg, "resolved config");
    let llm = build_llm(&cfg, &args.judge)?;
    let scorer = build_scorer(&cfg, llm, &args.embedder)?;

    let req = EvaluationRequest::new(
        args.question.as_str(),
        args.reference.as_str(),
        args.response.as_str(),
        args.audio.as_path(),
    );
    let result = scorer.score(&req).await?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => {
            println!("Question: {}", req.question);
            println!("Reference: {}", req.reference_answer);
            println!("Response: {}", req.predicted_response);
            println!("Results:");
            println!("  AURA Score: {:.4}", result.aura_score);
        }
    }
    Ok(exit_codes::SUCCESS)
}
