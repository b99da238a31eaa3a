//! Check operation - configuration validation.

use std::path::Path;

use cqlgen_codegen::pipeline::{
    CompilationContext, Phase, Severity,
    phases::{LowerPhase, ValidatePhase},
};
use cqlgen_schema::PersistConfig;
use eyre::Result;

use super::bake::describe;
use crate::reports::{CheckReport, TableSummary};

/// Execute the check operation.
///
/// Runs every lint and reports all diagnostics; tables are summarized only
/// when no lint reported an error.
pub fn check(config: PersistConfig, config_path: &Path) -> Result<CheckReport> {
    let mut ctx = CompilationContext::new(config);
    let validate = ValidatePhase::new();
    for lint in validate.lint_info() {
        tracing::debug!(lint = lint.name, "{}", lint.description);
    }

    // A failed validation leaves its diagnostics in the context.
    let tables = if validate.run(&mut ctx).is_ok() {
        LowerPhase.run(&mut ctx)?;
        ctx.take_ir()?
            .tables
            .iter()
            .map(|table| TableSummary {
                name: table.table_name.clone(),
                columns: table.columns.len(),
                partition_keys: table.keys.partition_keys.clone(),
                clustering_keys: table.keys.clustering_keys.clone(),
            })
            .collect()
    } else {
        Vec::new()
    };

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for diag in &ctx.diagnostics {
        let msg = describe(diag);
        match diag.severity {
            Severity::Error => errors.push(msg),
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }

    Ok(CheckReport {
        config_path: config_path.to_path_buf(),
        keyspace: ctx.config.keyspace.clone(),
        errors,
        warnings,
        infos,
        tables,
    })
}

#[cfg(test)]
mod tests {
    use cqlgen_codegen::testing::fixtures;

    use super::*;

    #[test]
    fn test_sample_is_valid() {
        let report = check(fixtures::sample_config(), Path::new("persist-config.json")).unwrap();

        assert!(report.is_valid());
        assert_eq!(report.tables.len(), 4);
        let events = &report.tables[1];
        assert_eq!(events.partition_keys, vec!["tenant"]);
        assert_eq!(events.clustering_keys, vec!["ts", "id"]);
    }

    #[test]
    fn test_lint_errors_are_reported() {
        // Two tables writing the same artifact.
        let config = fixtures::config(
            r#"{
  "keyspace": "app",
  "tables": [
    {"modelName": "A", "tableName": "a", "dao": "ADao", "generatedName": "same",
     "columns": [{"name": "id", "type": "uuid", "key": "partition"}]},
    {"modelName": "B", "tableName": "b", "dao": "BDao", "generatedName": "same",
     "columns": [{"name": "id", "type": "uuid", "key": "partition"}]}
  ]
}"#,
        );
        let report = check(config, Path::new("persist-config.json")).unwrap();

        assert!(!report.is_valid());
        assert!(report.tables.is_empty());
    }
}
