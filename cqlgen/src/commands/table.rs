use std::{path::PathBuf, process::ExitCode};

use clap::Args;
use cqlgen_schema::{PersistConfig, SingleTable, columns_file};
use eyre::Result;

use super::{OrReport, OutputArgs};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct TableCommand {
    /// Model type name
    #[arg(long)]
    pub model: String,

    /// DAO type name
    #[arg(long)]
    pub dao: String,

    /// Keyspace the table lives in
    #[arg(long)]
    pub keyspace: String,

    /// Module path of the generated DAO
    #[arg(long, default_value = "")]
    pub package: String,

    /// Table name (defaults to the lowercased model name)
    #[arg(long)]
    pub table: Option<String>,

    /// Module path that qualifies the model type
    #[arg(long)]
    pub model_package: Option<String>,

    /// Template spliced into the DAO before the stream record
    #[arg(long)]
    pub boilerplate: Option<PathBuf>,

    /// Columns file (defaults to <model>.json)
    #[arg(long)]
    pub columns: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl TableCommand {
    pub fn run(&self) -> Result<ExitCode> {
        let path = self
            .columns
            .clone()
            .unwrap_or_else(|| columns_file(&self.model));

        let config = PersistConfig::from_columns_file(&path, self.single_table()).or_report()?;
        tracing::debug!(columns = %path.display(), "loaded columns file");

        let report = ops::bake(config, self.output.options())?;
        report.render(&mut TerminalOutput::new());

        Ok(ExitCode::SUCCESS)
    }

    fn single_table(&self) -> SingleTable {
        SingleTable {
            keyspace: self.keyspace.clone(),
            package: self.package.clone(),
            model: self.model.clone(),
            dao: self.dao.clone(),
            table: self.table.clone(),
            boilerplate: self.boilerplate.clone(),
            model_package: self.model_package.clone(),
        }
    }
}
