use std::path::{Path, PathBuf};

use cqlgen_codegen::{
    Error,
    format::{Rustfmt, SourceFormatter},
    language::{GenerateResult, GeneratedPath, LanguageCodegen, PreviewFile},
    pipeline::CompilationContext,
    template::Template,
};
use cqlgen_core::{File, GeneratedFile};
use cqlgen_ir::{PersistIR, TableModel};
use eyre::{Result, WrapErr};

use crate::{
    EmissionModel,
    files::{DaoRs, DtoRs},
};

/// Rust code generator producing one DAO file and, when a model location is
/// configured, one DTO file per table.
pub struct Generator {
    ir: PersistIR,
    boilerplate: Option<Template>,
    formatter: Box<dyn SourceFormatter>,
}

impl LanguageCodegen for Generator {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn file_extension(&self) -> &'static str {
        "rs"
    }

    fn preview(&self) -> Result<Vec<PreviewFile>> {
        let mut files = Vec::new();
        for table in &self.ir.tables {
            files.extend(self.render_table(table)?);
        }
        Ok(files)
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        // Everything is rendered before the first write.
        let files = self.preview()?;

        let mut result = GenerateResult::default();
        for file in files {
            let path = output_dir.join(&file.path);
            let written = File::new(&path, file.content).write()?;
            tracing::debug!(path = %path.display(), result = ?written, "wrote file");
            result.files.push(GeneratedPath {
                path: file.path,
                table: file.table,
                result: written,
            });
        }
        Ok(result)
    }
}

impl Generator {
    /// Create a generator, reading the boilerplate template if one is configured.
    pub fn new(ir: PersistIR) -> Result<Self> {
        let boilerplate = ir.boilerplate.as_deref().map(load_boilerplate).transpose()?;

        Ok(Self {
            ir,
            boilerplate,
            formatter: Box::new(Rustfmt::new()),
        })
    }

    /// Create a generator from a context the pipeline has run over.
    pub fn from_context(mut ctx: CompilationContext) -> Result<Self> {
        Self::new(ctx.take_ir()?)
    }

    /// Replace the default `rustfmt` formatter.
    pub fn with_formatter(mut self, formatter: impl SourceFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn ir(&self) -> &PersistIR {
        &self.ir
    }

    fn render_table(&self, table: &TableModel) -> Result<Vec<PreviewFile>> {
        tracing::info!(table = %table.table_name, "rendering table");

        let model = EmissionModel::build(&self.ir, table);
        let boilerplate = self
            .boilerplate
            .as_ref()
            .map(|template| template.render(&model))
            .transpose()
            .map_err(Error::from)
            .wrap_err_with(|| {
                format!(
                    "failed to render the boilerplate for table '{}'",
                    table.table_name
                )
            })?;

        let mut files = Vec::new();

        let dao = DaoRs::new(&model).with_boilerplate(boilerplate);
        files.push(self.artifact(&table.table_name, dao.path(Path::new("")), dao.render())?);

        if let Some(dto) = DtoRs::new(&model) {
            files.push(self.artifact(&table.table_name, dto.path(Path::new("")), dto.render())?);
        }

        Ok(files)
    }

    fn artifact(&self, table: &str, path: PathBuf, source: String) -> Result<PreviewFile> {
        let content = self
            .formatter
            .format(&source)
            .map_err(|cause| Error::formatting(path.display().to_string(), &source, cause))?;

        tracing::debug!(
            path = %path.display(),
            formatter = self.formatter.name(),
            "formatted artifact"
        );

        Ok(PreviewFile {
            path,
            table: table.to_string(),
            content,
        })
    }
}

fn load_boilerplate(path: &Path) -> Result<Template> {
    if !path.is_file() {
        return Err(Error::configuration(format!(
            "boilerplate template '{}' does not exist",
            path.display()
        ))
        .into());
    }
    let template = Template::from_file(path).map_err(Error::from)?;
    tracing::debug!(
        path = %path.display(),
        placeholders = template.placeholders().count(),
        "loaded boilerplate"
    );
    Ok(template)
}

#[cfg(test)]
mod tests {
    use cqlgen_codegen::{
        format::Passthrough,
        testing::{FailingFormatter, fixtures},
    };

    use super::*;

    fn generator() -> Generator {
        Generator::new(fixtures::sample_ir())
            .unwrap()
            .with_formatter(Passthrough)
    }

    #[test]
    fn test_preview_order_follows_tables() {
        let files = generator().preview().unwrap();
        let paths: Vec<String> = files.iter().map(|f| f.path.display().to_string()).collect();
        assert_eq!(
            paths,
            vec![
                "users_dao_gen.rs",
                "src/models/users_dto_gen.rs",
                "events_dao_gen.rs",
                "src/models/events_dto_gen.rs",
                "posts_dao_gen.rs",
                "src/models/posts_dto_gen.rs",
                "readings_dao_gen.rs",
                "src/models/readings_dto_gen.rs",
            ]
        );
        assert_eq!(files[2].table, "events");
    }

    #[test]
    fn test_missing_boilerplate_is_configuration_error() {
        let mut ir = fixtures::sample_ir();
        ir.boilerplate = Some(PathBuf::from("does/not/exist.tmpl"));

        let err = Generator::new(ir).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_invalid_boilerplate_is_template_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boilerplate.tmpl");
        std::fs::write(&path, "impl {{ dao }\n").unwrap();

        let mut ir = fixtures::sample_ir();
        ir.boilerplate = Some(path);

        let err = Generator::new(ir).err().unwrap();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Template(_))));
    }

    #[test]
    fn test_formatter_failure_keeps_text() {
        let generator = Generator::new(fixtures::sample_ir())
            .unwrap()
            .with_formatter(FailingFormatter::on("EventStream"));

        let err = generator.preview().unwrap_err();
        match err.downcast_ref::<Error>() {
            Some(Error::Formatting {
                artifact,
                source_text,
                ..
            }) => {
                assert_eq!(artifact, "events_dao_gen.rs");
                assert!(source_text.contains("pub struct EventStream {"));
            }
            other => panic!("expected a formatting error, got {:?}", other),
        }
    }
}
