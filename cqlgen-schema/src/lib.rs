//! Table schema parsing and validation for cqlgen.
//!
//! A configuration describes one keyspace and the tables whose data-access
//! code should be generated. It is read from `persist-config.json`, or built
//! from a legacy `<model>.json` columns file, and validated before any code
//! is produced.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod parse;
mod validate;

pub use config::{ColumnDefinition, KeyRole, ModelGenerationTarget, PersistConfig, TableDefinition};
pub use error::{Error, Result, SourceContext};
pub use parse::{CONFIG_DIR, CONFIG_FILE, SingleTable, columns_file};
