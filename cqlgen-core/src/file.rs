use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

/// Trait for artifacts that render to a single source file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content
    fn render(&self) -> String;

    /// Render and write the file to disk
    fn write(&self, base: &Path) -> Result<WriteResult> {
        File::new(self.path(base), self.render()).write()
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create directory '{}'", parent.display()))?;
    }
    std::fs::write(path, content)
        .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File did not exist and was created
    Created,
    /// File existed with different content and was replaced
    Updated,
    /// File already had the exact content, nothing was written
    Unchanged,
}

/// A rendered file waiting to be written.
///
/// Generated artifacts are always overwritten; a file whose content is
/// already identical is left untouched so repeated runs keep mtimes stable.
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    /// Create a new file with the given path and content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file, creating parent directories as needed
    pub fn write(&self) -> Result<WriteResult> {
        if !self.exists() {
            write_file(&self.path, &self.content)?;
            return Ok(WriteResult::Created);
        }

        match std::fs::read_to_string(&self.path) {
            Ok(existing) if existing == self.content => Ok(WriteResult::Unchanged),
            _ => {
                write_file(&self.path, &self.content)?;
                Ok(WriteResult::Updated)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    struct Artifact;

    impl GeneratedFile for Artifact {
        fn path(&self, base: &Path) -> PathBuf {
            base.join("models").join("user_dto_gen.rs")
        }

        fn render(&self) -> String {
            "pub struct User {}\n".to_string()
        }
    }

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("user_dao_gen.rs");

        write_file(&path, "nested").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_file_write_reports_created() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("user_dao_gen.rs");

        let result = File::new(&path, "fn a() {}\n").write().unwrap();

        assert_eq!(result, WriteResult::Created);
        assert_eq!(fs::read_to_string(&path).unwrap(), "fn a() {}\n");
    }

    #[test]
    fn test_file_write_replaces_changed_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("user_dao_gen.rs");
        fs::write(&path, "old").unwrap();

        let result = File::new(&path, "new").write().unwrap();

        assert_eq!(result, WriteResult::Updated);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_file_write_skips_identical_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("user_dao_gen.rs");
        fs::write(&path, "same").unwrap();

        let result = File::new(&path, "same").write().unwrap();

        assert_eq!(result, WriteResult::Unchanged);
    }

    #[test]
    fn test_generated_file_write() {
        let temp = TempDir::new().unwrap();

        let result = Artifact.write(temp.path()).unwrap();

        assert_eq!(result, WriteResult::Created);
        let written = temp.path().join("models").join("user_dto_gen.rs");
        assert_eq!(
            fs::read_to_string(written).unwrap(),
            "pub struct User {}\n"
        );
    }
}
