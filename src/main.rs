use clap::Parser;
use frame_curator::api::{execute, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    frame_curator::init_logging();
    execute(cli)?;
    Ok(())
}
