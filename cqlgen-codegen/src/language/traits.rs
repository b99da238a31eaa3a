//! Language-agnostic code generation traits.

use std::path::{Path, PathBuf};

use cqlgen_core::WriteResult;
use eyre::Result;

/// A backend that turns lowered tables into source files.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "rust")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "rs")
    fn file_extension(&self) -> &'static str;

    /// Render and format every artifact without touching the disk.
    ///
    /// Fails on the first artifact that cannot be rendered or formatted.
    fn preview(&self) -> Result<Vec<PreviewFile>>;

    /// Render every artifact, then write them all into `output_dir`.
    ///
    /// Nothing is written unless every artifact rendered successfully.
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult>;
}

/// A generated file for preview
#[derive(Debug, Clone)]
pub struct PreviewFile {
    /// Path relative to the output directory
    pub path: PathBuf,
    /// Table the file was generated from
    pub table: String,
    pub content: String,
}

/// Result of code generation
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Every file written, in generation order
    pub files: Vec<GeneratedPath>,
}

impl GenerateResult {
    pub fn count(&self, result: WriteResult) -> usize {
        self.files.iter().filter(|f| f.result == result).count()
    }
}

/// Outcome of writing one file.
#[derive(Debug, Clone)]
pub struct GeneratedPath {
    pub path: PathBuf,
    pub table: String,
    pub result: WriteResult,
}
