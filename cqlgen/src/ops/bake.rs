//! Bake operation - code generation from a configuration.

use std::path::Path;

use cqlgen_codegen::{
    format::Passthrough,
    language::LanguageCodegen,
    pipeline::{Diagnostic, Pipeline},
};
use cqlgen_codegen_rust::Generator;
use cqlgen_schema::PersistConfig;
use eyre::{Context, Result};

use crate::reports::{BakeReport, GenerationResult, PreviewFile, WrittenFile};

/// Options for the bake operation.
pub struct BakeOptions<'a> {
    /// Output directory for generated code.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Whether to run generated code through rustfmt.
    pub format: bool,
}

/// Execute the bake operation.
///
/// Every artifact is rendered and formatted before the first file is written.
pub fn bake(config: PersistConfig, opts: BakeOptions) -> Result<BakeReport> {
    let keyspace = config.keyspace.clone();
    let ctx = Pipeline::new().run(config).wrap_err("Pipeline failed")?;

    let warnings = ctx.warnings().map(describe).collect();

    let generator = Generator::from_context(ctx)?;
    let generator = if opts.format {
        generator
    } else {
        generator.with_formatter(Passthrough)
    };
    let tables = generator
        .ir()
        .tables
        .iter()
        .map(|t| t.table_name.clone())
        .collect();

    let result = if opts.dry_run {
        let files = generator
            .preview()?
            .into_iter()
            .map(|f| PreviewFile {
                path: f.path.display().to_string(),
                content: f.content,
            })
            .collect();
        GenerationResult::Preview(files)
    } else {
        let generated = generator
            .generate(opts.output_dir)
            .wrap_err("Failed to generate code")?;
        let files = generated
            .files
            .into_iter()
            .map(|f| WrittenFile {
                path: f.path.display().to_string(),
                result: f.result,
            })
            .collect();
        GenerationResult::Written {
            output_dir: opts.output_dir.to_path_buf(),
            files,
        }
    };

    Ok(BakeReport {
        keyspace,
        warnings,
        tables,
        result,
    })
}

pub(crate) fn describe(diag: &Diagnostic) -> String {
    match &diag.location {
        Some(loc) => format!("{}\n  --> {}", diag.message, loc),
        None => diag.message.clone(),
    }
}

#[cfg(test)]
mod tests {
    use cqlgen_codegen::testing::{fixtures, list_files};
    use cqlgen_core::WriteResult;

    use super::*;

    fn options(output_dir: &Path, dry_run: bool) -> BakeOptions<'_> {
        BakeOptions {
            output_dir,
            dry_run,
            format: false,
        }
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let report = bake(fixtures::sample_config(), options(dir.path(), true)).unwrap();

        let GenerationResult::Preview(files) = &report.result else {
            panic!("expected a preview");
        };
        assert_eq!(files.len(), 8);
        assert_eq!(files[0].path, "users_dao_gen.rs");
        assert!(list_files(dir.path()).is_empty());
    }

    #[test]
    fn test_bake_writes_and_reports() {
        let dir = tempfile::TempDir::new().unwrap();
        let report = bake(fixtures::sample_config(), options(dir.path(), false)).unwrap();

        assert_eq!(report.keyspace, "app");
        assert_eq!(report.tables, vec!["users", "events", "posts", "readings"]);
        let GenerationResult::Written { files, .. } = &report.result else {
            panic!("expected written files");
        };
        assert_eq!(files.len(), 8);
        assert!(files.iter().all(|f| f.result == WriteResult::Created));
        assert_eq!(list_files(dir.path()).len(), 8);
    }

    #[test]
    fn test_warnings_are_collected() {
        let config = fixtures::config(
            r#"{
  "keyspace": "app",
  "tables": [{
    "modelName": "Counter",
    "tableName": "counters",
    "dao": "CounterDao",
    "columns": [
      {"name": "id", "type": "text", "key": "partition"},
      {"name": "hits", "type": "counter"}
    ]
  }]
}"#,
        );
        let dir = tempfile::TempDir::new().unwrap();
        let report = bake(config, options(dir.path(), true)).unwrap();

        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("counter"));
    }
}
