use clap::Parser;
use sounding_processor::cli::{run, Cli};
use sounding_processor::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
