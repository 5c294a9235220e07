//! CLI entry point for classifying Sokoban level images

use clap::Parser;
use sokogrid::io::cli::{Cli, LevelProcessor};

fn main() -> sokogrid::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let mut processor = LevelProcessor::new(cli);
    processor.process()
}
