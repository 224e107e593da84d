use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{FeedConfig, DEFAULT_CONFIG_FILENAME};

#[derive(Debug, Parser)]
#[command(name = "feedctl", version, about = "Browse a paginated article API")]
pub struct Cli {
    /// Config file (RON). Missing file means built-in defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_FILENAME)]
    pub config: PathBuf,

    /// Article API base URL, e.g. https://example.com/api
    #[arg(long)]
    pub base_url: Option<String>,

    /// Log debug output (to the terminal, and to the log file if configured).
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Page through the article list.
    List(ListArgs),
    /// Show a single article by id or slug.
    Show { key: String },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Server-side section filter.
    #[arg(long)]
    pub section: Option<String>,

    #[arg(long)]
    pub page_size: Option<u32>,

    /// How many more pages to request after the first.
    #[arg(long, default_value_t = 2)]
    pub scroll: u32,

    /// Drive paging through sentinel visibility instead of explicit requests.
    #[arg(long)]
    pub infinite: bool,

    /// Only render articles of this category ("Home" shows everything).
    #[arg(long)]
    pub category: Option<String>,

    /// Only render articles whose title or summary contains this text.
    #[arg(long)]
    pub search: Option<String>,
}

impl Cli {
    /// Folds command-line overrides into the loaded config.
    pub fn apply(&self, config: &mut FeedConfig) {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Command::List(args) = &self.command {
            if let Some(section) = &args.section {
                config.section = Some(section.clone());
            }
            if let Some(page_size) = args.page_size {
                config.page_size = page_size;
            }
            if args.infinite {
                config.infinite_scroll = true;
            }
        }
    }
}
