mod bake;
mod check;
mod completions;
mod table;

use std::{path::PathBuf, process::ExitCode};

use bake::BakeCommand;
use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use table::TableCommand;

use crate::ops::BakeOptions;

/// Extension trait turning configuration errors into reports `main` can render with miette.
pub(crate) trait OrReport<T> {
    fn or_report(self) -> Result<T>;
}

impl<T> OrReport<T> for cqlgen_schema::Result<T> {
    fn or_report(self) -> Result<T> {
        self.map_err(|e| eyre::Report::new(*e))
    }
}

#[derive(Parser)]
#[command(name = "cqlgen")]
#[command(version)]
#[command(about = "Generate Scylla/Cassandra DAOs and DTOs from a JSON table schema")]
pub(crate) struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `bake` with every option at its default
    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    pub fn run(&self) -> Result<ExitCode> {
        match &self.command {
            None => BakeCommand::default().run(),
            Some(Commands::Bake(cmd)) => cmd.run(),
            Some(Commands::Table(cmd)) => cmd.run(),
            Some(Commands::Check(cmd)) => cmd.run(),
            Some(Commands::Completions(cmd)) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate code for every table in persist-config.json
    Bake(BakeCommand),

    /// Generate code for one table from a legacy <model>.json columns file
    Table(TableCommand),

    /// Validate the configuration without generating code
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Options shared by every command that generates code.
#[derive(Args, Clone)]
pub(crate) struct OutputArgs {
    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Skip rustfmt and emit the code as rendered
    #[arg(long)]
    pub no_format: bool,
}

impl OutputArgs {
    pub fn options(&self) -> BakeOptions<'_> {
        BakeOptions {
            output_dir: &self.output,
            dry_run: self.dry_run,
            format: !self.no_format,
        }
    }
}

impl Default for OutputArgs {
    fn default() -> Self {
        Self {
            output: PathBuf::from("."),
            dry_run: false,
            no_format: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_bakes() {
        let cli = Cli::try_parse_from(["cqlgen"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["cqlgen", "check", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_table_requires_model_and_dao() {
        assert!(Cli::try_parse_from(["cqlgen", "table", "--model", "User"]).is_err());
        assert!(
            Cli::try_parse_from([
                "cqlgen", "table", "--model", "User", "--dao", "UserDao", "--keyspace", "app"
            ])
            .is_ok()
        );
    }
}
