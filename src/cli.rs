//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

/// Collect ABC fiddle tunes from the web.
///
/// Scrapes source pages for links to tune files, downloads them, removes
/// duplicate content and sorts the rest into tunes, collections, others and
/// unknown.
#[derive(Parser, Debug)]
#[command(name = "auto-fiddler")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory downloads are written to and organized under [default: ./downloads]
    #[arg(short = 'o', long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Maximum concurrent downloads (1-100) [default: 1]
    #[arg(short = 'c', long, global = true, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub concurrency: Option<u8>,

    /// File extension to collect, matched as a suffix [default: .abc]
    #[arg(short = 'e', long, global = true)]
    pub extension: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Scrape source pages and download the linked files
    Fetch(SourceArgs),
    /// Delete files whose content duplicates another file in the output directory
    Dedupe,
    /// Sort files in the output directory into bucket subdirectories
    Classify,
    /// Fetch, dedupe and classify in one go
    Run(SourceArgs),
    /// Print the header fields and body of a tune file as JSON
    Metadata {
        /// ABC file to read
        file: PathBuf,
    },
    /// Write each tune of a collection file to its own file
    Split(SplitArgs),
    /// Show effective configuration (file + defaults)
    Config,
}

/// Where the source page URLs come from.
#[derive(Args, Debug, Clone, Default)]
#[command(group(ArgGroup::new("sources").required(true).multiple(true).args(["urls", "sites"])))]
pub struct SourceArgs {
    /// Source page URLs to scrape
    pub urls: Vec<String>,

    /// YAML site list mapping category names to page URLs
    #[arg(short = 's', long)]
    pub sites: Option<PathBuf>,

    /// Category of the site list to use [default: the first one]
    #[arg(long, requires = "sites")]
    pub category: Option<String>,
}

/// Arguments for `split`.
#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    /// Collection file to split
    pub file: PathBuf,

    /// Directory for the individual tunes [default: the file's directory]
    #[arg(short = 'd', long)]
    pub dest: Option<PathBuf>,

    /// Delete the collection once its tunes are written
    #[arg(long)]
    pub remove_original: bool,
}
