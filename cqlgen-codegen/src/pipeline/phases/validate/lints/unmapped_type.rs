//! Lint for storage types without a mapping.

use cqlgen_ir::StorageType;
use cqlgen_schema::PersistConfig;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Warns about columns whose storage type has no target type.
///
/// Such columns still generate, with a sentinel type that fails to compile
/// in the consuming crate.
pub struct UnmappedTypeLint;

impl Lint for UnmappedTypeLint {
    fn name(&self) -> &'static str {
        "unmapped-storage-type"
    }

    fn description(&self) -> &'static str {
        "Warn about storage types the generator cannot map"
    }

    fn check(&self, config: &PersistConfig, diagnostics: &mut Vec<Diagnostic>) {
        for table in &config.tables {
            for column in &table.columns {
                if StorageType::parse(&column.storage_type).is_unknown() {
                    diagnostics.push(
                        Diagnostic::warning(
                            "validate",
                            format!(
                                "column '{}' of table '{}' has unmapped storage type '{}'",
                                column.name, table.table_name, column.storage_type
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
    fn test_unmapped_type() {
        let config = fixtures::config(
            r#"{"keyspace": "app", "tables": [
                {"modelName": "Score", "tableName": "scores", "dao": "ScoreDao",
                 "columns": [{"name": "id", "type": "uuid", "key": "partition"},
                             {"name": "total", "type": "varint"},
                             {"name": "nested", "type": "list<list<int>>"}]}
            ]}"#,
        );

        let mut diagnostics = Vec::new();
        UnmappedTypeLint.check(&config, &mut diagnostics);

        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].message.contains("varint"));
        assert_eq!(
            diagnostics[1].location.as_deref(),
            Some("tables.scores.columns.nested")
        );
    }

    #[test]
    fn test_sample_is_clean() {
        let mut diagnostics = Vec::new();
        UnmappedTypeLint.check(&fixtures::sample_config(), &mut diagnostics);
        assert!(diagnostics.is_empty());
    }
}
