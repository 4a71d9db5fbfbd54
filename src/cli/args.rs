//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Parse REAPER .rpp project files and query their node tree
#[derive(Parser, Debug)]
#[command(name = "rpptree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, env = "RPPTREE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Drop blank lines instead of keeping them as empty nodes
    #[arg(long, global = true)]
    pub skip_blank_lines: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the node tree
    Tree {
        /// Project file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Deepest level to show
        #[arg(long)]
        depth: Option<usize>,
        /// Show type tags only
        #[arg(long)]
        no_values: bool,
    },

    /// Find nodes by type (and name)
    Query {
        /// Project file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Node type, e.g. TRACK
        node_type: String,
        /// Only nodes whose NAME child matches
        #[arg(short, long)]
        name: Option<String>,
        /// Search all descendants, not just children of the root
        #[arg(short, long)]
        recursive: bool,
        /// Only the first match
        #[arg(long, conflicts_with = "last")]
        first: bool,
        /// Only the last match
        #[arg(long)]
        last: bool,
    },

    /// Print values at a slash-separated type path, e.g. TRACK/ITEM/NAME
    Get {
        /// Project file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Type path below the root
        path: String,
    },

    /// List media files referenced by items
    Media {
        /// Project file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Only list files that do not exist
        #[arg(long)]
        missing: bool,
    },

    /// Summarize projects (tempo, tracks, items)
    Info {
        /// Project files
        #[arg(required = true, value_hint = ValueHint::FilePath)]
        files: Vec<PathBuf>,
    },

    /// Show effective settings
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
