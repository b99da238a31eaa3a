//! Loading configurations from disk or strings.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use indexmap::IndexSet;

use crate::{ColumnDefinition, Error, PersistConfig, Result, SourceContext, TableDefinition};

/// Default configuration file name for batch mode.
pub const CONFIG_FILE: &str = "persist-config.json";

/// Directory searched when the configuration is not in the working directory.
pub const CONFIG_DIR: &str = "config";

impl FromStr for PersistConfig {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, CONFIG_FILE)
    }
}

impl PersistConfig {
    /// Locate and parse a configuration file.
    ///
    /// A relative path that does not exist is retried under `config/`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_in(Path::new(""), path)
    }

    /// Like [`PersistConfig::open`], resolving relative paths against `base`.
    pub fn open_in(base: &Path, path: impl AsRef<Path>) -> Result<Self> {
        let path = resolve(base, path.as_ref())?;
        Self::from_file(path)
    }

    /// Parse a configuration file from the given path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = read(path)?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a configuration with a custom filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let config: Self = serde_json::from_str(content).map_err(|e| ctx.parse_error(e))?;
        config.validate(&ctx)?;
        Ok(config)
    }

    /// Build a one-table configuration from a legacy columns file.
    ///
    /// The file is a JSON array of column definitions; table and type names
    /// come from `options`.
    pub fn from_columns_file(path: impl AsRef<Path>, options: SingleTable) -> Result<Self> {
        let path = path.as_ref();
        let content = read(path)?;
        Self::from_columns_str(&content, &path.display().to_string(), options)
    }

    /// Build a one-table configuration from a JSON array of columns.
    pub fn from_columns_str(content: &str, filename: &str, options: SingleTable) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let columns: Vec<ColumnDefinition> =
            serde_json::from_str(content).map_err(|e| ctx.parse_error(e))?;

        let config = options.into_config(columns);
        config.validate(&ctx)?;
        Ok(config)
    }
}

/// Names supplied on the command line for the legacy single-table mode.
#[derive(Debug, Clone, Default)]
pub struct SingleTable {
    pub keyspace: String,
    pub package: String,
    pub model: String,
    pub dao: String,
    /// Table name; defaults to the model name
    pub table: Option<String>,
    pub boilerplate: Option<PathBuf>,
    pub model_package: Option<String>,
}

impl SingleTable {
    fn into_config(self, columns: Vec<ColumnDefinition>) -> PersistConfig {
        let table_name = self.table.unwrap_or_else(|| self.model.to_lowercase());
        PersistConfig {
            keyspace: self.keyspace,
            target_package: self.package,
            boilerplate_path: self.boilerplate,
            additional_imports: IndexSet::new(),
            model_import_alias: self.model_package,
            model_generation: None,
            tables: vec![TableDefinition {
                generated_name: table_name.clone(),
                model_name: self.model,
                dao_name: self.dao,
                table_name,
                columns,
            }],
        }
    }
}

/// Path of the columns file used by the legacy mode for a model.
pub fn columns_file(model: &str) -> PathBuf {
    PathBuf::from(format!("{}.json", model))
}

fn resolve(base: &Path, path: &Path) -> Result<PathBuf> {
    let direct = base.join(path);
    if direct.exists() {
        return Ok(direct);
    }

    if path.is_relative() {
        let fallback = base.join(CONFIG_DIR).join(path);
        if fallback.exists() {
            return Ok(fallback);
        }
        return Err(Box::new(Error::NotFound {
            name: path.display().to_string(),
            searched: format!("'.' and '{}/'", CONFIG_DIR),
        }));
    }

    Err(Box::new(Error::NotFound {
        name: path.display().to_string(),
        searched: format!("'{}'", path.parent().unwrap_or(path).display()),
    }))
}

fn read(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Box::new(Error::Io {
            path: path.to_path_buf(),
            source: e,
        })
    })?;
    if content.trim().is_empty() {
        return Err(Box::new(Error::EmptyFile {
            path: path.to_path_buf(),
        }));
    }
    Ok(content)
}
