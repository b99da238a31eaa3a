use std::{path::PathBuf, process::ExitCode};

use clap::Args;
use cqlgen_schema::{CONFIG_FILE, PersistConfig};
use eyre::Result;

use super::{OrReport, OutputArgs};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct BakeCommand {
    /// Path to the configuration; a relative path is also looked up under config/
    #[arg(short, long, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl Default for BakeCommand {
    fn default() -> Self {
        Self {
            config: PathBuf::from(CONFIG_FILE),
            output: OutputArgs::default(),
        }
    }
}

impl BakeCommand {
    pub fn run(&self) -> Result<ExitCode> {
        let config = PersistConfig::open(&self.config).or_report()?;
        tracing::debug!(
            config = %self.config.display(),
            tables = config.tables.len(),
            "loaded configuration"
        );

        let report = ops::bake(config, self.output.options())?;
        report.render(&mut TerminalOutput::new());

        Ok(ExitCode::SUCCESS)
    }
}
