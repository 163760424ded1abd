//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::config::Settings;

/// Flatten branching truth-tree proofs (willow) into indexed node graphs (yew)
#[derive(Parser, Debug)]
#[command(name = "willow2yew")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Increase log output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (default: $XDG_CONFIG_HOME/willow2yew/willow2yew.toml)
    #[arg(
        long,
        global = true,
        env = "WILLOW2YEW_CONFIG_FILE",
        value_hint = ValueHint::FilePath
    )]
    pub config_file: Option<PathBuf>,

    /// `willow2yew <FILE>` is shorthand for `willow2yew convert <FILE>`
    #[command(flatten)]
    pub convert: ConvertArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the yew node graph for a willow proof
    Convert(ConvertArgs),

    /// Validate a willow or yew file and summarize the proof
    Check {
        /// Willow proof or yew node file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Reject references that point to a later statement
        #[arg(long)]
        strict: bool,
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

#[derive(Args, Debug, Clone, Default)]
pub struct ConvertArgs {
    /// Willow proof file
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Output file (default: input with its extension replaced)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Write the records on a single line
    #[arg(long)]
    pub compact: bool,

    /// Reject references that point to a later statement
    #[arg(long)]
    pub strict: bool,

    /// Fail instead of replacing an existing output file
    #[arg(long)]
    pub no_clobber: bool,
}

impl ConvertArgs {
    /// Command-line flags override every other settings layer.
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if self.compact {
            settings.indent = 0;
        }
        if self.strict {
            settings.strict_references = true;
        }
        if self.no_clobber {
            settings.overwrite = false;
        }
        settings
    }
}
