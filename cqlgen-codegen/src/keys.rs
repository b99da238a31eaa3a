//! Primary key structure and the CQL fragments derived from it.

use cqlgen_ir::{ClusteringOrder, KeyStructure};
use cqlgen_schema::{ColumnDefinition, KeyRole};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("table '{table}' has no partition key")]
    NoPartitionKey { table: String },
}

/// Derive the key structure of a table from its column roles.
///
/// Every list keeps column declaration order.
pub fn build_key_structure(
    table: &str,
    columns: &[ColumnDefinition],
) -> Result<KeyStructure, KeyError> {
    let mut keys = KeyStructure::default();

    for column in columns {
        let name = &column.name;
        match column.key_role {
            KeyRole::None => continue,
            KeyRole::Partition => keys.partition_keys.push(name.clone()),
            KeyRole::Cluster => keys.clustering_keys.push(name.clone()),
            KeyRole::ClusterAsc => {
                keys.clustering_keys.push(name.clone());
                keys.clustering_order.push((name.clone(), ClusteringOrder::Asc));
            }
            KeyRole::ClusterDesc => {
                keys.clustering_keys.push(name.clone());
                keys.clustering_order.push((name.clone(), ClusteringOrder::Desc));
            }
        }
        keys.all_keys.push(name.clone());
    }

    if keys.partition_keys.is_empty() {
        return Err(KeyError::NoPartitionKey {
            table: table.to_string(),
        });
    }

    Ok(keys)
}

/// Text fragments spliced into CQL statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyClauses {
    /// `id` for a single key, `(a, b)` for a composite one
    pub partition_key_clause: String,
    /// Empty, or `, c1, c2`
    pub clustering_columns_clause: String,
    /// Empty, or `WITH CLUSTERING ORDER BY (c1 DESC, c2 ASC)`
    pub clustering_order_clause: String,
    /// `k1, k2, c1`
    pub all_keys_clause: String,
    /// `k1=? AND k2=? AND c1=?`
    pub all_keys_equality: String,
    /// `k1, k2`
    pub partition_keys_clause: String,
    /// `k1=? AND k2=?`
    pub partition_keys_equality: String,
}

impl From<&KeyStructure> for KeyClauses {
    fn from(keys: &KeyStructure) -> Self {
        let partition_key_clause = match keys.partition_keys.as_slice() {
            [single] => single.clone(),
            many => format!("({})", many.join(", ")),
        };

        let clustering_columns_clause = keys
            .clustering_keys
            .iter()
            .map(|k| format!(", {}", k))
            .collect();

        let clustering_order_clause = if keys.clustering_order.is_empty() {
            String::new()
        } else {
            let order: Vec<String> = keys
                .clustering_order
                .iter()
                .map(|(name, order)| format!("{} {}", name, order.as_str()))
                .collect();
            format!("WITH CLUSTERING ORDER BY ({})", order.join(", "))
        };

        Self {
            partition_key_clause,
            clustering_columns_clause,
            clustering_order_clause,
            all_keys_clause: keys.all_keys.join(", "),
            all_keys_equality: equality(&keys.all_keys),
            partition_keys_clause: keys.partition_keys.join(", "),
            partition_keys_equality: equality(&keys.partition_keys),
        }
    }
}

fn equality(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("{}=?", n))
        .collect::<Vec<_>>()
        .join(" AND ")
}
