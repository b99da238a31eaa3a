//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from configuration validation.
#[derive(Debug)]
pub struct CheckReport {
    pub config_path: PathBuf,
    pub keyspace: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    /// Empty when validation failed.
    pub tables: Vec<TableSummary>,
}

/// Key layout of one table.
#[derive(Debug)]
pub struct TableSummary {
    pub name: String,
    pub columns: usize,
    pub partition_keys: Vec<String>,
    pub clustering_keys: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }

        for warning in &self.warnings {
            out.warning(warning);
        }

        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.is_valid() {
            return;
        }

        if !self.warnings.is_empty() {
            out.newline();
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();
        out.section(&format!("  Keyspace {}", self.keyspace));
        for table in &self.tables {
            let mut keys = match table.partition_keys.as_slice() {
                [single] => single.clone(),
                many => format!("({})", many.join(", ")),
            };
            for key in &table.clustering_keys {
                keys.push_str(", ");
                keys.push_str(key);
            }
            out.list_item(&format!(
                "{} [{} column{}] PRIMARY KEY ({})",
                table.name,
                table.columns,
                if table.columns == 1 { "" } else { "s" },
                keys
            ));
        }
    }
}
