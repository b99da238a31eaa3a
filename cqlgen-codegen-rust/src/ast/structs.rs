//! Struct declarations for DTOs, row types and stream records.

use cqlgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// A field in a Rust struct.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: String,
    pub doc: Option<String>,
    pub attrs: Vec<String>,
    pub is_public: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
            attrs: Vec::new(),
            is_public: true,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    fn to_fragments(&self) -> Vec<CodeFragment> {
        let vis = if self.is_public { "pub " } else { "" };
        let mut fragments = Vec::new();

        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc));
        }
        for attr in &self.attrs {
            fragments.push(CodeFragment::line(format!("#[{}]", attr)));
        }
        fragments.push(CodeFragment::line(format!(
            "{}{}: {},",
            vis, self.name, self.ty
        )));

        fragments
    }
}

/// A struct declaration; public unless marked otherwise.
#[derive(Debug, Clone)]
pub struct Struct {
    name: String,
    doc: Option<String>,
    derives: Vec<String>,
    attrs: Vec<String>,
    fields: Vec<Field>,
    is_public: bool,
}

impl Struct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            derives: Vec::new(),
            attrs: Vec::new(),
            fields: Vec::new(),
            is_public: true,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn derive(mut self, derive: impl Into<String>) -> Self {
        self.derives.push(derive.into());
        self
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    /// Build the struct as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Struct {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let vis = if self.is_public { "pub " } else { "" };
        let mut fragments = Vec::new();

        if let Some(doc) = &self.doc {
            for line in doc.lines() {
                fragments.push(CodeFragment::doc(line));
            }
        }

        if !self.derives.is_empty() {
            fragments.push(CodeFragment::line(format!(
                "#[derive({})]",
                self.derives.join(", ")
            )));
        }

        for attr in &self.attrs {
            fragments.push(CodeFragment::line(format!("#[{}]", attr)));
        }

        if self.fields.is_empty() {
            fragments.push(CodeFragment::line(format!(
                "{}struct {} {{}}",
                vis, self.name
            )));
        } else {
            fragments.push(CodeFragment::braced(
                format!("{}struct {} {{", vis, self.name),
                self.fields.iter().flat_map(Field::to_fragments).collect(),
            ));
        }

        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_struct() {
        let s = Struct::new("Empty").build();
        assert_eq!(s, "pub struct Empty {}\n");
    }

    #[test]
    fn test_struct_with_derives() {
        let s = Struct::new("User")
            .derive("Debug")
            .derive("Clone")
            .build();
        assert!(s.contains("#[derive(Debug, Clone)]"));
        assert!(s.contains("pub struct User {}"));
    }

    #[test]
    fn test_struct_with_fields() {
        let s = Struct::new("User")
            .field(Field::new("id", "Option<Uuid>"))
            .field(Field::new("email", "String"))
            .build();
        assert_eq!(
            s,
            "pub struct User {\n    pub id: Option<Uuid>,\n    pub email: String,\n}\n"
        );
    }

    #[test]
    fn test_private_row_struct() {
        let s = Struct::new("UserRow")
            .private()
            .attr("derive(scylla::FromRow)")
            .field(Field::new("id", "Option<Uuid>").private())
            .build();
        assert!(s.starts_with("#[derive(scylla::FromRow)]\nstruct UserRow {"));
        assert!(s.contains("    id: Option<Uuid>,"));
    }

    #[test]
    fn test_field_with_doc_and_attrs() {
        let s = Struct::new("User")
            .field(
                Field::new("created_at", "Option<DateTime<Utc>>")
                    .doc("When the account was created")
                    .attr("serde(rename = \"createdAt\")"),
            )
            .build();
        assert!(s.contains("    /// When the account was created\n"));
        assert!(s.contains("    #[serde(rename = \"createdAt\")]\n"));
        assert!(s.contains("    pub created_at: Option<DateTime<Utc>>,\n"));
    }
}
