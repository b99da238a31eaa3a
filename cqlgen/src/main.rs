mod commands;
mod logging;
mod ops;
mod reports;

use std::process::ExitCode;

use clap::Parser;
use eyre::Result;

use crate::commands::Cli;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.run() {
        Ok(code) => Ok(code),
        // Configuration errors carry source spans; let miette draw them.
        Err(report) => match report.downcast::<cqlgen_schema::Error>() {
            Ok(err) => {
                eprintln!("{:?}", miette::Report::new(err));
                Ok(ExitCode::FAILURE)
            }
            Err(report) => Err(report),
        },
    }
}
