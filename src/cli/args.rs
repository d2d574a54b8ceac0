use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "iceberg-tracker")]
#[command(about = "Antarctic iceberg position tracker for NASA SCP scatterometer data")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "History file path override")]
    pub data_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape the latest iceberg positions and append them to the history
    Scrape {
        #[arg(long, default_value = "false", help = "Parse and report without writing anything")]
        dry_run: bool,
    },

    /// Show a summary of the collected data
    Info,

    /// Generate the static HTML map from the history
    Map {
        #[arg(
            short,
            long,
            help = "Output HTML file path [default: output/iceberg_map.html]"
        )]
        output: Option<PathBuf>,
    },

    /// Generate the JSON API endpoint files from the history
    Api {
        #[arg(short, long, help = "Output directory [default: api]")]
        output_dir: Option<PathBuf>,
    },

    /// List movement animation URLs for the current icebergs
    Animations,
}
