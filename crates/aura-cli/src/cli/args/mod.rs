use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod common;
pub mod score;
pub use common::*;
pub use score::*;

#[derive(Parser)]
#[command(
    name = "aura",
    version,
    about = "AURA score for audio question answering: rubric judgment fused with audio-text entailment"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score one response
    Score(ScoreArgs),
    /// Print the prompt that would be sent to the judge or hypothesis generator
    Prompt(PromptArgs),
    /// Write a sample aura.yaml
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct PromptArgs {
    #[command(subcommand)]
    pub kind: PromptKind,
}

#[derive(Subcommand, Debug)]
pub enum PromptKind {
    /// Few-shot rubric prompt
    Rubric {
        #[arg(long)]
        question: String,
        #[arg(long)]
        reference: String,
        #[arg(long)]
        response: String,
    },
    /// Hypothesis rewriting prompt
    Hypothesis {
        #[arg(long)]
        question: String,
        #[arg(long)]
        response: String,
    },
}

#[derive(Parser, Clone, Debug)]
pub struct InitArgs {
    #[arg(long, default_value = aura_core::config::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
