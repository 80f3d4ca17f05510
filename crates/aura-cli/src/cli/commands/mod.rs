use super::args::*;

pub mod builder;
pub mod init;
pub mod prompt;
pub mod score;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Score(args) => score::run(args).await,
        Command::Prompt(args) => prompt::run(args),
        Command::Init(args) => init::run(args),
    }
}
