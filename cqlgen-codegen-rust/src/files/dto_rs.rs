use std::path::{Path, PathBuf};

use cqlgen_core::GeneratedFile;

use super::header;
use crate::{EmissionModel, Field, RUST_NAMING, RustFile, Struct};

/// The DTO struct of one table, written into the model location.
pub struct DtoRs<'a> {
    model: &'a EmissionModel,
}

impl<'a> DtoRs<'a> {
    /// `None` when the run has no model generation target.
    pub fn new(model: &'a EmissionModel) -> Option<Self> {
        model.dto.as_ref().map(|_| Self { model })
    }

    fn file_name(&self) -> String {
        format!(
            "{}_dto_gen.rs",
            RUST_NAMING.file_stem(&self.model.generated_name)
        )
    }

    fn build_struct(&self) -> Struct {
        let fields = self.model.columns.iter().map(|column| {
            let field = Field::new(&column.ident, &column.dto_type)
                .attr(format!("serde(rename = \"{}\")", column.serde_tag));
            if column.unmapped {
                field.doc(format!("Storage type `{}` has no Rust mapping", column.storage_type))
            } else {
                field
            }
        });

        Struct::new(&self.model.model)
            .derive("Debug")
            .derive("Clone")
            .derive("Serialize")
            .derive("Deserialize")
            .fields(fields)
    }
}

impl GeneratedFile for DtoRs<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        let location = self
            .model
            .dto
            .as_ref()
            .map(|target| target.location.as_path())
            .unwrap_or(Path::new(""));
        base.join(location).join(self.file_name())
    }

    fn render(&self) -> String {
        let package = self
            .model
            .dto
            .as_ref()
            .map(|target| target.package.as_str())
            .unwrap_or_default();
        let description = format!(
            "Model of table `{}` in module `{}`",
            self.model.qualified_table(),
            package
        );

        RustFile::new()
            .header(&header(&description, &self.model.definition_json))
            .imports(&self.model.dto_imports)
            .add(self.build_struct())
            .render()
    }
}

#[cfg(test)]
mod tests {
    use cqlgen_codegen::testing::fixtures;

    use super::*;

    fn model(name: &str) -> EmissionModel {
        let ir = fixtures::sample_ir();
        EmissionModel::build(&ir, ir.table(name).unwrap())
    }

    #[test]
    fn test_dto_path_uses_location() {
        let model = model("users");
        let dto = DtoRs::new(&model).unwrap();
        assert_eq!(
            dto.path(Path::new("out")),
            PathBuf::from("out/src/models/users_dto_gen.rs")
        );
    }

    #[test]
    fn test_no_dto_without_target() {
        let mut ir = fixtures::sample_ir();
        ir.model_target = None;
        let model = EmissionModel::build(&ir, ir.table("users").unwrap());
        assert!(DtoRs::new(&model).is_none());
    }

    #[test]
    fn test_dto_fields_and_tags() {
        let model = model("users");
        let content = DtoRs::new(&model).unwrap().render();

        assert!(content.starts_with("// Code generated by cqlgen; DO NOT EDIT.\n"));
        assert!(content.contains("// Model of table `app.users` in module `crate::models`"));
        assert!(content.contains("use serde::{Deserialize, Serialize};\n"));
        assert!(content.contains(
            "#[derive(Debug, Clone, Serialize, Deserialize)]\npub struct User {\n"
        ));
        assert!(content.contains(
            "    #[serde(rename = \"createdAt\")]\n    pub created_at: Option<DateTime<Utc>>,\n"
        ));
    }

    #[test]
    fn test_unmapped_column_is_documented() {
        let config = fixtures::config(
            r#"{"keyspace": "app", "package": "crate::dao",
                "ModelGeneration": {"Package": "crate::models", "Location": "models"},
                "tables": [{"modelName": "Counter", "tableName": "counters", "dao": "CounterDao",
                  "columns": [{"name": "id", "type": "text", "key": "partition"},
                              {"name": "hits", "type": "counter"}]}]}"#,
        );
        let table = cqlgen_codegen::pipeline::phases::lower_table(&config.tables[0]).unwrap();
        let mut ir = fixtures::sample_ir();
        ir.tables = vec![table];
        let model = EmissionModel::build(&ir, &ir.tables[0]);
        let content = DtoRs::new(&model).unwrap().render();

        assert!(content.contains("    /// Storage type `counter` has no Rust mapping\n"));
        assert!(content.contains("    pub hits: UnmappedCqlType,\n"));
    }
}
