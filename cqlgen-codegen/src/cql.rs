//! CQL statements for one table.

use cqlgen_ir::TableModel;
use serde::Serialize;

use crate::keys::KeyClauses;

/// Every statement a generated DAO issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statements {
    /// Multi-line `CREATE TABLE IF NOT EXISTS`
    pub create: String,
    pub insert: String,
    /// Select one row by every key column
    pub select_by_key: String,
    /// Select all rows of a partition
    pub select_by_partition: String,
    /// Delete one row by every key column
    pub delete: String,
}

impl Statements {
    pub fn new(keyspace: &str, table: &TableModel) -> Self {
        let clauses = KeyClauses::from(&table.keys);
        let qualified = format!("{}.{}", keyspace, table.table_name);
        let columns: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        let column_list = columns.join(", ");

        let mut create = format!("CREATE TABLE IF NOT EXISTS {} (\n", qualified);
        for column in &table.columns {
            create.push_str(&format!("    {} {},\n", column.name, column.storage_type));
        }
        create.push_str(&format!(
            "    PRIMARY KEY ({}{})\n)",
            clauses.partition_key_clause, clauses.clustering_columns_clause
        ));
        if !clauses.clustering_order_clause.is_empty() {
            create.push(' ');
            create.push_str(&clauses.clustering_order_clause);
        }

        let placeholders = vec!["?"; columns.len()].join(", ");

        Self {
            create,
            insert: format!(
                "INSERT INTO {} ({}) VALUES ({})",
                qualified, column_list, placeholders
            ),
            select_by_key: format!(
                "SELECT {} FROM {} WHERE {}",
                column_list, qualified, clauses.all_keys_equality
            ),
            select_by_partition: format!(
                "SELECT {} FROM {} WHERE {}",
                column_list, qualified, clauses.partition_keys_equality
            ),
            delete: format!(
                "DELETE FROM {} WHERE {}",
                qualified, clauses.all_keys_equality
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_statements_for_clustered_table() {
        let table = fixtures::events_table();
        let statements = Statements::new("app", &table);

        assert_eq!(
            statements.create,
            "CREATE TABLE IF NOT EXISTS app.events (\n    tenant text,\n    ts timestamp,\n    id timeuuid,\n    body text,\n    PRIMARY KEY (tenant, ts, id)\n) WITH CLUSTERING ORDER BY (ts DESC)"
        );
        assert_eq!(
            statements.insert,
            "INSERT INTO app.events (tenant, ts, id, body) VALUES (?, ?, ?, ?)"
        );
        assert_eq!(
            statements.select_by_key,
            "SELECT tenant, ts, id, body FROM app.events WHERE tenant=? AND ts=? AND id=?"
        );
        assert_eq!(
            statements.select_by_partition,
            "SELECT tenant, ts, id, body FROM app.events WHERE tenant=?"
        );
        assert_eq!(
            statements.delete,
            "DELETE FROM app.events WHERE tenant=? AND ts=? AND id=?"
        );
    }

    #[test]
    fn test_create_without_clustering() {
        let table = fixtures::users_table();
        let statements = Statements::new("app", &table);

        assert!(statements.create.ends_with("    PRIMARY KEY (id)\n)"));
        assert!(!statements.create.contains("CLUSTERING"));
    }
}
