//! Lint for deserialize targets that have no effect.

use cqlgen_ir::StorageType;
use cqlgen_schema::PersistConfig;

use super::super::Lint;
use crate::{mapping::ignores_deserialize_target, pipeline::Diagnostic};

/// Warns when `deserializeTo` is set on a column that is not a blob collection.
pub struct IgnoredDeserializeTargetLint;

impl Lint for IgnoredDeserializeTargetLint {
    fn name(&self) -> &'static str {
        "ignored-deserialize-target"
    }

    fn description(&self) -> &'static str {
        "Warn about deserialize targets on columns that are not list<blob> or map<text,blob>"
    }

    fn check(&self, config: &PersistConfig, diagnostics: &mut Vec<Diagnostic>) {
        for table in &config.tables {
            for column in &table.columns {
                let storage = StorageType::parse(&column.storage_type);
                let target = column.deserialize_target.as_deref();
                if ignores_deserialize_target(&storage, target) {
                    diagnostics.push(
                        Diagnostic::warning(
                            "validate",
                            format!(
                                "deserializeTo on column '{}' ({}) is ignored",
                                column.name, column.storage_type
                            ),
                        )
                        .at(Diagnostic::column_location(&table.table_name, &column.name)),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_ignored_target() {
        let config = fixtures::config(
            r#"{"keyspace": "app", "tables": [
                {"modelName": "Doc", "tableName": "docs", "dao": "DocDao",
                 "columns": [{"name": "id", "type": "uuid", "key": "partition"},
                             {"name": "body", "type": "blob", "deserializeTo": "Body"},
                             {"name": "parts", "type": "list<blob>", "deserializeTo": "Part"}]}
            ]}"#,
        );

        let mut diagnostics = Vec::new();
        IgnoredDeserializeTargetLint.check(&config, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_warning());
        assert!(diagnostics[0].message.contains("'body'"));
    }
}
