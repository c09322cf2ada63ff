use anyhow::Result;
use clap::Parser;

use darkstrip::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
