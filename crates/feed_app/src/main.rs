mod app;
mod cli;
mod config;
mod effects;
mod render;

use anyhow::Context;
use clap::Parser;
use feed_logging::{feed_info, LevelFilter, LogDestination};

use cli::{Cli, Command};
use config::FeedConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, origin) = FeedConfig::load(&cli.config)
        .with_context(|| format!("loading {:?}", cli.config))?;
    cli.apply(&mut config);

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let destination = match config.log_file.clone() {
        Some(path) if cli.verbose => LogDestination::Both(path),
        Some(path) => LogDestination::File(path),
        None => LogDestination::Terminal,
    };
    feed_logging::initialize(destination, level);
    feed_info!("{}", origin);

    match &cli.command {
        Command::List(args) => app::run_list(&config, args),
        Command::Show { key } => app::run_show(&config, key),
    }
}
