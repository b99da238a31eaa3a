//! Configuration model for `persist-config.json`.

use std::path::PathBuf;

use indexmap::IndexSet;
use serde::{Deserialize, Deserializer, Serialize};

/// Root configuration: one keyspace, a target module and its tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistConfig {
    /// Keyspace every table is created in
    #[serde(default)]
    pub keyspace: String,

    /// Module path the generated DAO files belong to
    #[serde(rename = "package", default)]
    pub target_package: String,

    /// Template spliced into every DAO file before the stream record type
    #[serde(
        rename = "boilerplate",
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub boilerplate_path: Option<PathBuf>,

    /// Extra `use` paths added to every DAO file, in order, without duplicates
    #[serde(rename = "imports", default)]
    pub additional_imports: IndexSet<String>,

    /// Module path that qualifies the model type inside DAO files
    #[serde(
        rename = "modelPackage",
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub model_import_alias: Option<String>,

    /// Where DTO structs are generated; no DTOs when absent
    #[serde(
        rename = "ModelGeneration",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub model_generation: Option<ModelGenerationTarget>,

    #[serde(default)]
    pub tables: Vec<TableDefinition>,
}

/// Module and directory for generated DTO files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelGenerationTarget {
    #[serde(rename = "Package", alias = "package", default)]
    pub package: String,
    #[serde(rename = "Location", alias = "location", default)]
    pub location: PathBuf,
}

/// A single table and the names of the code generated for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDefinition {
    #[serde(rename = "modelName", default)]
    pub model_name: String,
    #[serde(rename = "tableName", default)]
    pub table_name: String,
    #[serde(rename = "dao", default)]
    pub dao_name: String,
    #[serde(rename = "generatedName", default)]
    pub generated_name: String,
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    /// Base name of the generated files, falling back to the table name.
    pub fn artifact_name(&self) -> &str {
        if self.generated_name.is_empty() {
            &self.table_name
        } else {
            &self.generated_name
        }
    }

    /// Columns with the given key role, in declaration order.
    pub fn columns_with_role(&self, role: KeyRole) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.iter().filter(move |c| c.key_role == role)
    }

    /// Whether at least one column is a partition key.
    pub fn has_partition_key(&self) -> bool {
        self.columns_with_role(KeyRole::Partition).next().is_some()
    }
}

/// A column as declared in the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,

    /// CQL type as written, e.g. `text` or `map<text,blob>`
    #[serde(rename = "type")]
    pub storage_type: String,

    #[serde(rename = "key", default, skip_serializing_if = "KeyRole::is_none")]
    pub key_role: KeyRole,

    /// Type each blob element is decoded into
    #[serde(
        rename = "deserializeTo",
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub deserialize_target: Option<String>,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, storage_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            storage_type: storage_type.into(),
            key_role: KeyRole::None,
            deserialize_target: None,
        }
    }

    pub fn key(mut self, role: KeyRole) -> Self {
        self.key_role = role;
        self
    }

    pub fn deserialize_to(mut self, target: impl Into<String>) -> Self {
        self.deserialize_target = Some(target.into());
        self
    }
}

/// Role a column plays in the primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeyRole {
    /// Regular column
    #[default]
    #[serde(rename = "", alias = "none")]
    None,
    #[serde(rename = "partition")]
    Partition,
    /// Clustering column without an explicit order
    #[serde(rename = "cluster")]
    Cluster,
    #[serde(rename = "cluster-asc")]
    ClusterAsc,
    #[serde(rename = "cluster-desc")]
    ClusterDesc,
}

impl KeyRole {
    pub fn is_none(&self) -> bool {
        matches!(self, KeyRole::None)
    }

    pub fn is_clustering(&self) -> bool {
        matches!(
            self,
            KeyRole::Cluster | KeyRole::ClusterAsc | KeyRole::ClusterDesc
        )
    }

    pub fn is_key(&self) -> bool {
        !self.is_none()
    }

    /// Schema spelling of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyRole::None => "",
            KeyRole::Partition => "partition",
            KeyRole::Cluster => "cluster",
            KeyRole::ClusterAsc => "cluster-asc",
            KeyRole::ClusterDesc => "cluster-desc",
        }
    }
}

/// Treat missing, null and blank strings alike.
fn non_empty<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(T::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_role_spellings() {
        let spellings = r#"["", "none", "partition", "cluster", "cluster-asc", "cluster-desc"]"#;
        let roles: Vec<KeyRole> = serde_json::from_str(spellings).unwrap();
        assert_eq!(
            roles,
            vec![
                KeyRole::None,
                KeyRole::None,
                KeyRole::Partition,
                KeyRole::Cluster,
                KeyRole::ClusterAsc,
                KeyRole::ClusterDesc,
            ]
        );
    }

    #[test]
    fn test_unknown_key_role_rejected() {
        let result = serde_json::from_str::<KeyRole>(r#""primary""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_column_defaults() {
        let column: ColumnDefinition =
            serde_json::from_str(r#"{"name": "body", "type": "text", "deserializeTo": "  "}"#)
                .unwrap();
        assert_eq!(column.key_role, KeyRole::None);
        assert_eq!(column.deserialize_target, None);
    }

    #[test]
    fn test_column_serializes_without_defaults() {
        let column = ColumnDefinition::new("id", "uuid").key(KeyRole::Partition);
        let json = serde_json::to_string(&column).unwrap();
        assert_eq!(json, r#"{"name":"id","type":"uuid","key":"partition"}"#);
    }

    #[test]
    fn test_artifact_name_falls_back_to_table() {
        let table: TableDefinition =
            serde_json::from_str(r#"{"modelName": "User", "tableName": "users", "dao": "UserDao"}"#)
                .unwrap();
        assert_eq!(table.artifact_name(), "users");
    }

    #[test]
    fn test_imports_keep_order_and_drop_duplicates() {
        let config: PersistConfig = serde_json::from_str(
            r#"{"keyspace": "app", "imports": ["crate::b", "crate::a", "crate::b"]}"#,
        )
        .unwrap();
        let imports: Vec<&str> = config.additional_imports.iter().map(String::as_str).collect();
        assert_eq!(imports, vec!["crate::b", "crate::a"]);
    }
}
