use clap::Parser;
use scripts::{cli::Cli, utils::init_tracing};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let Cli { global, command } = Cli::parse();

    init_tracing();

    command.run(global).await?;
    Ok(())
}
