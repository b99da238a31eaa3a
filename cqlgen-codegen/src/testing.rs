//! Test utilities for code generators.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::path::Path;

use eyre::Result;

use crate::format::{FormatError, SourceFormatter};

/// Configurations and lowered tables shared by the test suites.
pub mod fixtures {
    use cqlgen_ir::{PersistIR, TableModel};
    use cqlgen_schema::PersistConfig;

    use crate::pipeline::{Pipeline, phases::lower_table};

    /// Four tables covering every key shape and every mapped storage type.
    pub const SAMPLE_CONFIG: &str = r#"{
  "keyspace": "app",
  "package": "crate::dao",
  "imports": ["crate::dao::AppDao"],
  "modelPackage": "crate::models",
  "ModelGeneration": {"Package": "crate::models", "Location": "src/models"},
  "tables": [
    {
      "modelName": "User",
      "tableName": "users",
      "dao": "UserDao",
      "generatedName": "users",
      "columns": [
        {"name": "id", "type": "uuid", "key": "partition"},
        {"name": "email", "type": "text"},
        {"name": "createdAt", "type": "timestamp"}
      ]
    },
    {
      "modelName": "Event",
      "tableName": "events",
      "dao": "EventDao",
      "generatedName": "events",
      "columns": [
        {"name": "tenant", "type": "text", "key": "partition"},
        {"name": "ts", "type": "timestamp", "key": "cluster-desc"},
        {"name": "id", "type": "timeuuid", "key": "cluster"},
        {"name": "body", "type": "text"}
      ]
    },
    {
      "modelName": "Post",
      "tableName": "posts",
      "dao": "PostDao",
      "generatedName": "posts",
      "columns": [
        {"name": "id", "type": "uuid", "key": "partition"},
        {"name": "ts", "type": "timestamp", "key": "cluster-desc"},
        {"name": "tags", "type": "list<blob>", "deserializeTo": "crate::models::Tag"},
        {"name": "attrs", "type": "map<text,blob>", "deserializeTo": "Attr"},
        {"name": "labels", "type": "set<text>"}
      ]
    },
    {
      "modelName": "Reading",
      "tableName": "readings",
      "dao": "ReadingDao",
      "generatedName": "readings",
      "columns": [
        {"name": "sensor", "type": "text", "key": "partition"},
        {"name": "day", "type": "int", "key": "partition"},
        {"name": "value", "type": "double"},
        {"name": "raw", "type": "blob"}
      ]
    }
  ]
}"#;

    /// Parse a configuration, panicking on errors.
    pub fn config(json: &str) -> PersistConfig {
        json.parse()
            .unwrap_or_else(|e| panic!("invalid test configuration: {e:?}"))
    }

    pub fn sample_config() -> PersistConfig {
        config(SAMPLE_CONFIG)
    }

    /// Run the full pipeline over the sample configuration.
    pub fn sample_ir() -> PersistIR {
        Pipeline::new()
            .run(sample_config())
            .and_then(|mut ctx| ctx.take_ir())
            .unwrap_or_else(|e| panic!("sample configuration failed to lower: {e:?}"))
    }

    /// Lower one table of the sample configuration.
    pub fn table(name: &str) -> TableModel {
        let config = sample_config();
        let definition = config
            .tables
            .iter()
            .find(|t| t.table_name == name)
            .unwrap_or_else(|| panic!("no sample table '{name}'"));
        lower_table(definition).unwrap_or_else(|e| panic!("failed to lower '{name}': {e:?}"))
    }

    /// Single partition key, no clustering.
    pub fn users_table() -> TableModel {
        table("users")
    }

    /// Ordered and unordered clustering columns.
    pub fn events_table() -> TableModel {
        table("events")
    }

    /// Serialized blob collections.
    pub fn posts_table() -> TableModel {
        table("posts")
    }

    /// Composite partition key.
    pub fn readings_table() -> TableModel {
        table("readings")
    }
}

/// Formatter that fails on any text containing `marker`.
#[derive(Debug, Clone)]
pub struct FailingFormatter {
    pub marker: String,
}

impl FailingFormatter {
    pub fn on(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl SourceFormatter for FailingFormatter {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn format(&self, source: &str) -> Result<String, FormatError> {
        if source.contains(&self.marker) {
            return Err(FormatError::Failed {
                program: "failing".to_string(),
                status: "exit status: 1".to_string(),
                stderr: format!("refusing to format text containing '{}'", self.marker),
            });
        }
        Ok(source.to_string())
    }
}

/// Generate into a temporary directory that lives as long as the returned handle.
pub fn generate_to_temp<F>(generate: F) -> Result<tempfile::TempDir>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let temp_dir = tempfile::TempDir::new()?;
    generate(temp_dir.path())?;
    Ok(temp_dir)
}

/// Relative paths of every file under `dir`, sorted.
pub fn list_files(dir: &Path) -> Vec<String> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(root, &path, out);
            } else if let Ok(relative) = path.strip_prefix(root) {
                out.push(relative.display().to_string());
            }
        }
    }

    let mut files = Vec::new();
    walk(dir, dir, &mut files);
    files.sort();
    files
}
