//! Lint for tables that would write the same files.

use std::collections::HashMap;

use cqlgen_schema::PersistConfig;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Errors when two tables share a generated file name.
pub struct DuplicateArtifactLint;

impl Lint for DuplicateArtifactLint {
    fn name(&self) -> &'static str {
        "duplicate-artifact"
    }

    fn description(&self) -> &'static str {
        "Reject tables that generate files with the same name"
    }

    fn check(&self, config: &PersistConfig, diagnostics: &mut Vec<Diagnostic>) {
        let mut seen: HashMap<String, &str> = HashMap::new();
        for table in &config.tables {
            // File names are case-insensitive on some platforms.
            let artifact = table.artifact_name().to_lowercase();
            if let Some(first) = seen.get(&artifact) {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!(
                            "tables '{}' and '{}' both generate '{}'",
                            first,
                            table.table_name,
                            table.artifact_name()
                        ),
                    )
                    .at(format!("tables.{}", table.table_name)),
                );
            } else {
                seen.insert(artifact, &table.table_name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_duplicate_artifact() {
        let config = fixtures::config(
            r#"{"keyspace": "app", "tables": [
                {"modelName": "User", "tableName": "users", "dao": "UserDao",
                 "columns": [{"name": "id", "type": "uuid", "key": "partition"}]},
                {"modelName": "Admin", "tableName": "admins", "dao": "AdminDao", "generatedName": "Users",
                 "columns": [{"name": "id", "type": "uuid", "key": "partition"}]}
            ]}"#,
        );

        let mut diagnostics = Vec::new();
        DuplicateArtifactLint.check(&config, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.as_deref(), Some("tables.admins"));
    }
}
