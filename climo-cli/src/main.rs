//! climo CLI - day-of-year climate summaries from IEM ASOS daily records.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "climo-cli",
    version,
    about = "Day-of-year climate history toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: climo_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    climo_cmd::run(cli.command).await
}
