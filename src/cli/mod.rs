//! CLI layer: argument parsing, command dispatch, and terminal output

pub mod args;
pub mod commands;
pub mod error;
pub mod output;

pub use args::{Cli, Commands, ConvertArgs};
pub use commands::execute_command;
pub use error::{CliError, CliResult};
