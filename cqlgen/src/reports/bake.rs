//! Bake command report data structures.

use std::path::{Path, PathBuf};

use cqlgen_core::WriteResult;

use super::output::{Output, Report};

/// Report data from code generation.
#[derive(Debug)]
pub struct BakeReport {
    pub keyspace: String,

    /// Warning messages from the pipeline.
    pub warnings: Vec<String>,

    /// Tables in generation order.
    pub tables: Vec<String>,

    /// Files written, or the preview.
    pub result: GenerationResult,
}

#[derive(Debug)]
pub enum GenerationResult {
    Written {
        output_dir: PathBuf,
        files: Vec<WrittenFile>,
    },
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

#[derive(Debug)]
pub struct WrittenFile {
    /// Path relative to the output directory.
    pub path: String,
    pub result: WriteResult,
}

#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl Report for BakeReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        match &self.result {
            GenerationResult::Written { output_dir, files } => {
                self.render_written(out, output_dir, files)
            }
            GenerationResult::Preview(files) => self.render_preview(out, files),
        }
    }
}

impl BakeReport {
    fn render_written(&self, out: &mut dyn Output, output_dir: &Path, files: &[WrittenFile]) {
        out.section(&format!(
            "Keyspace {} ({} table{})",
            self.keyspace,
            self.tables.len(),
            if self.tables.len() == 1 { "" } else { "s" }
        ));
        for file in files {
            match file.result {
                WriteResult::Created => out.added_item(&file.path),
                WriteResult::Updated => out.updated_item(&file.path),
                WriteResult::Unchanged => out.unchanged_item(&file.path),
            }
        }
        out.newline();

        let count = |result: WriteResult| files.iter().filter(|f| f.result == result).count();
        out.key_value(
            "Generated",
            &format!(
                "{} ({} created, {} updated, {} unchanged)",
                output_dir.display(),
                count(WriteResult::Created),
                count(WriteResult::Updated),
                count(WriteResult::Unchanged)
            ),
        );
    }

    fn render_preview(&self, out: &mut dyn Output, files: &[PreviewFile]) {
        for file in files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!(
            "{} files would be generated for {} tables",
            files.len(),
            self.tables.len()
        ));
    }
}
