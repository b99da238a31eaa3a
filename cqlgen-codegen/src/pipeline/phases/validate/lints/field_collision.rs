//! Lint for columns that map to the same field name.

use std::collections::HashMap;

use cqlgen_core::to_snake_case;
use cqlgen_schema::PersistConfig;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Errors when two columns of a table become the same struct field.
///
/// `userID` and `user_id` are distinct CQL columns but both render as
/// `user_id`.
pub struct FieldCollisionLint;

impl Lint for FieldCollisionLint {
    fn name(&self) -> &'static str {
        "field-collision"
    }

    fn description(&self) -> &'static str {
        "Reject columns whose field names collide"
    }

    fn check(&self, config: &PersistConfig, diagnostics: &mut Vec<Diagnostic>) {
        for table in &config.tables {
            let mut fields: HashMap<String, &str> = HashMap::new();
            for column in &table.columns {
                let field = to_snake_case(&column.name);
                if let Some(first) = fields.get(&field) {
                    diagnostics.push(
                        Diagnostic::error(
                            "validate",
                            format!(
                                "columns '{}' and '{}' of table '{}' both map to field '{}'",
                                first, column.name, table.table_name, field
                            ),
                        )
                        .at(Diagnostic::column_location(&table.table_name, &column.name)),
                    );
                } else {
                    fields.insert(field, &column.name);
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
    fn test_field_collision() {
        let config = fixtures::config(
            r#"{"keyspace": "app", "tables": [
                {"modelName": "User", "tableName": "users", "dao": "UserDao",
                 "columns": [{"name": "userID", "type": "uuid", "key": "partition"},
                             {"name": "user_id", "type": "text"}]}
            ]}"#,
        );

        let mut diagnostics = Vec::new();
        FieldCollisionLint.check(&config, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_error());
        assert!(diagnostics[0].message.contains("'user_id'"));
    }

    #[test]
    fn test_distinct_fields() {
        let mut diagnostics = Vec::new();
        FieldCollisionLint.check(&fixtures::sample_config(), &mut diagnostics);
        assert!(diagnostics.is_empty());
    }
}
