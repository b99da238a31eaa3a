//! Lowered tables.
//!
//! ```text
//! PersistConfig → PersistIR { tables: [TableModel { columns, keys, imports }] }
//! ```

use std::path::PathBuf;

use serde::Serialize;

use crate::{ImportFlags, StorageType, TypeRef};

/// Whole-run IR: global settings plus every lowered table, in configuration order.
#[derive(Debug, Clone, Serialize)]
pub struct PersistIR {
    pub keyspace: String,
    /// Module the DAO files belong to
    pub package: String,
    /// Boilerplate template, resolved but not yet read
    pub boilerplate: Option<PathBuf>,
    /// Extra `use` paths, in declaration order
    pub additional_imports: Vec<String>,
    /// Module that qualifies model types inside DAO files
    pub model_package: Option<String>,
    /// DTO destination; `None` disables DTO generation
    pub model_target: Option<ModelTarget>,
    pub tables: Vec<TableModel>,
}

impl PersistIR {
    /// Look up a table by its table name.
    pub fn table(&self, name: &str) -> Option<&TableModel> {
        self.tables.iter().find(|t| t.table_name == name)
    }
}

/// Module path and directory of the generated DTOs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelTarget {
    pub package: String,
    pub location: PathBuf,
}

/// One table, ready for emission.
#[derive(Debug, Clone, Serialize)]
pub struct TableModel {
    pub model_name: String,
    pub table_name: String,
    pub dao_name: String,
    /// Base name of the generated files
    pub generated_name: String,
    pub columns: Vec<ColumnModel>,
    pub keys: KeyStructure,
    /// Union of the import flags of every column
    pub imports: ImportFlags,
    /// Pretty-printed JSON of the table definition, echoed in file headers
    pub definition_json: String,
}

impl TableModel {
    pub fn column(&self, name: &str) -> Option<&ColumnModel> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns in the given key list, in that list's order.
    pub fn key_columns<'a>(&'a self, names: &'a [String]) -> impl Iterator<Item = &'a ColumnModel> {
        names.iter().filter_map(|name| self.column(name))
    }

    pub fn serialized_columns(&self) -> impl Iterator<Item = &ColumnModel> {
        self.columns.iter().filter(|c| c.is_serialized())
    }
}

/// A column with its mapped type.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnModel {
    pub name: String,
    /// CQL type exactly as written in the schema
    pub storage_type: String,
    pub storage: StorageType,
    /// Type of the field on the model
    pub target: TypeRef,
    /// Present only for a blob collection with a deserialize target
    pub serialized: Option<SerializedElement>,
}

impl ColumnModel {
    pub fn is_serialized(&self) -> bool {
        self.serialized.is_some()
    }
}

/// How a blob collection column decodes into structured values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SerializedElement {
    pub shape: SerializedShape,
    /// Type every element (or map value) decodes into, as configured
    pub element_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SerializedShape {
    /// `list<blob>` decoding into `Vec<T>`
    List,
    /// `map<text,blob>` decoding into `HashMap<String, T>`
    Map,
}

/// Sort direction of an ordered clustering column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClusteringOrder {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl ClusteringOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusteringOrder::Asc => "ASC",
            ClusteringOrder::Desc => "DESC",
        }
    }
}

/// Primary key layout of a table, derived once from the column roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyStructure {
    /// Partition key columns, in column order; never empty once built
    pub partition_keys: Vec<String>,
    /// Clustering columns of any kind, in column order
    pub clustering_keys: Vec<String>,
    /// Only clustering columns declared with an explicit direction
    pub clustering_order: Vec<(String, ClusteringOrder)>,
    /// Every key column, in column order
    pub all_keys: Vec<String>,
}

impl KeyStructure {
    pub fn is_key(&self, column: &str) -> bool {
        self.all_keys.iter().any(|k| k == column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PrimitiveType, ScalarType};

    fn column(name: &str, target: TypeRef) -> ColumnModel {
        ColumnModel {
            name: name.to_string(),
            storage_type: "text".to_string(),
            storage: StorageType::Scalar {
                scalar: ScalarType::Text,
            },
            target,
            serialized: None,
        }
    }

    fn table() -> TableModel {
        TableModel {
            model_name: "Event".into(),
            table_name: "events".into(),
            dao_name: "EventDao".into(),
            generated_name: "events".into(),
            columns: vec![
                column("ts", TypeRef::primitive(PrimitiveType::Timestamp)),
                column("tenant", TypeRef::string()),
                column("body", TypeRef::string()),
            ],
            keys: KeyStructure {
                partition_keys: vec!["tenant".into()],
                clustering_keys: vec!["ts".into()],
                clustering_order: vec![("ts".into(), ClusteringOrder::Desc)],
                all_keys: vec!["ts".into(), "tenant".into()],
            },
            imports: ImportFlags::default(),
            definition_json: String::new(),
        }
    }

    #[test]
    fn test_key_columns_follow_list_order() {
        let table = table();
        let names: Vec<&str> = table
            .key_columns(&table.keys.partition_keys)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["tenant"]);

        let names: Vec<&str> = table
            .key_columns(&table.keys.all_keys)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["ts", "tenant"]);
    }

    #[test]
    fn test_key_structure_queries() {
        let table = table();
        assert!(!table.keys.clustering_keys.is_empty());
        assert!(table.keys.is_key("tenant"));
        assert!(!table.keys.is_key("body"));
        assert_eq!(table.serialized_columns().count(), 0);
    }

    #[test]
    fn test_clustering_order_spelling() {
        assert_eq!(ClusteringOrder::Asc.as_str(), "ASC");
        assert_eq!(
            serde_json::to_string(&ClusteringOrder::Desc).unwrap(),
            r#""DESC""#
        );
    }
}
