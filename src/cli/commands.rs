//! Command dispatch

use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConvertArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::{InfraError, InfraResult};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Convert(args)) => convert(cli, args),
        Some(Commands::Check { file, strict }) => check(cli, file, *strict),
        Some(Commands::Config) => show_config(cli),
        Some(Commands::Completion { shell }) => Ok(completion(*shell)?),
        None => convert(cli, &cli.convert),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let settings = Settings::load(cli.config_file.as_deref())?;
    debug!(?settings, "settings loaded");
    Ok(settings)
}

#[instrument(skip(cli))]
fn convert(cli: &Cli, args: &ConvertArgs) -> CliResult<()> {
    let Some(file) = args.file.as_deref() else {
        return Err(CliError::Usage(
            "missing input file, see `willow2yew --help`".to_string(),
        ));
    };
    let settings = args.apply(load_settings(cli)?);
    let container = ServiceContainer::new(settings);

    let report = container
        .conversion_service()
        .convert(file, args.output.as_deref())?;
    if report.nodes == 0 {
        output::warning(&format!("{} contains no statements", file.display()));
    }
    output::success(&format!(
        "{} -> {} ({} nodes, {} antecedents)",
        report.input.display(),
        report.output.display(),
        report.nodes,
        report.antecedents
    ));
    Ok(())
}

#[instrument(skip(cli))]
fn check(cli: &Cli, file: &Path, strict: bool) -> CliResult<()> {
    let mut settings = load_settings(cli)?;
    settings.strict_references |= strict;
    let container = ServiceContainer::new(settings);

    let summary = container.conversion_service().check(file)?;
    output::header(&file.display());
    output::metric("nodes", summary.nodes);
    output::metric("premises", summary.premises);
    output::metric("antecedents", summary.antecedents);
    output::metric("branches", summary.branches);
    output::metric("leaves", summary.leaves);
    output::metric("depth", summary.depth);
    output::metric("closed", summary.closed);
    output::metric("open", summary.open);
    if summary.unfinished > 0 {
        output::warning(&format!(
            "{} branches end without a terminator",
            summary.unfinished
        ));
    }
    output::success("numbering is consistent");
    Ok(())
}

fn show_config(cli: &Cli) -> CliResult<()> {
    let settings = load_settings(cli)?;
    output::info(&settings.to_toml()?);
    Ok(())
}

fn completion(shell: Shell) -> InfraResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    eprintln!("Generating completion file for {shell:?}...");
    let mut script = Vec::new();
    generate(shell, &mut cmd, name, &mut script);
    io::stdout()
        .write_all(&script)
        .map_err(|e| InfraError::io("write completion script", e))
}
