use super::{DeviceArg, EmbedderArgs, JudgeArgs, OutputFormat};
use std::path::PathBuf;

#[derive(clap::Args, Clone, Debug)]
pub struct ScoreArgs {
    #[arg(long)]
    pub question: String,

    /// Reference (gold) answer
    #[arg(long)]
    pub reference: String,

    /// Predicted answer being scored
    #[arg(long)]
    pub response: String,

    /// Audio file the question is about
    #[arg(long)]
    pub audio: PathBuf,

    /// Config file. Defaults to ./aura.yaml when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Weight of the entailment band
    #[arg(long)]
    pub weight: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub thresh_low: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub thresh_high: Option<f64>,

    /// Skip audio entailment and score from the rubric alone
    #[arg(long)]
    pub no_audio: bool,

    #[arg(long, value_enum)]
    pub device: Option<DeviceArg>,

    #[command(flatten)]
    pub judge: JudgeArgs,

    #[command(flatten)]
    pub embedder: EmbedderArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
