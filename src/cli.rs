//! CLI definitions for the DarkVoir demo binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// DarkVoir CLI.
#[derive(Parser)]
#[command(name = "darkvoir")]
#[command(about = "Element-targeting guidance engine demo")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/darkvoir.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Rank page elements against a query and print the planner prompt
    Analyze {
        /// JSON page fixture
        #[arg(long)]
        page: PathBuf,

        /// Natural-language query
        query: String,

        /// Print raw candidate JSON instead of the prompt rendering
        #[arg(long)]
        json: bool,
    },

    /// Run a scripted guide session against a page fixture
    Guide {
        /// JSON page fixture
        #[arg(long)]
        page: PathBuf,

        /// JSON step script (the planner wire shape)
        #[arg(long)]
        steps: PathBuf,

        /// Query passed to the planner, for the logs
        #[arg(long, default_value = "scripted guide")]
        query: String,
    },
}
