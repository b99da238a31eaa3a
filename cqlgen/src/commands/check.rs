use std::{path::PathBuf, process::ExitCode};

use clap::Args;
use cqlgen_schema::{CONFIG_FILE, PersistConfig};
use eyre::Result;

use super::OrReport;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the configuration; a relative path is also looked up under config/
    #[arg(short, long, default_value = CONFIG_FILE)]
    pub config: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<ExitCode> {
        let config = PersistConfig::open(&self.config).or_report()?;
        let report = ops::check(config, &self.config)?;
        report.render(&mut TerminalOutput::new());

        if report.is_valid() {
            Ok(ExitCode::SUCCESS)
        } else {
            Ok(ExitCode::FAILURE)
        }
    }
}
