//! Rust function builder.

use cqlgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// A parameter in a Rust function.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    /// A receiver such as `&self`.
    pub fn receiver(receiver: impl Into<String>) -> Self {
        Self::new(receiver, "")
    }

    fn format(&self) -> String {
        if self.ty.is_empty() {
            self.name.clone()
        } else {
            format!("{}: {}", self.name, self.ty)
        }
    }
}

/// Builder for Rust functions.
#[derive(Debug, Clone)]
pub struct Fn {
    name: String,
    doc: Option<String>,
    attrs: Vec<String>,
    is_public: bool,
    is_async: bool,
    generics: Option<String>,
    params: Vec<Param>,
    return_type: Option<String>,
    body: Vec<CodeFragment>,
}

impl Fn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            attrs: Vec::new(),
            is_public: true,
            is_async: false,
            generics: None,
            params: Vec::new(),
            return_type: None,
            body: Vec::new(),
        }
    }

    /// Doc comment; each line of `doc` becomes one `///` line.
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

    pub fn async_(mut self) -> Self {
        self.is_async = true;
        self
    }

    /// Generic parameter list without the angle brackets.
    pub fn generics(mut self, generics: impl Into<String>) -> Self {
        self.generics = Some(generics.into());
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn params(mut self, params: impl IntoIterator<Item = Param>) -> Self {
        self.params.extend(params);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    /// Add a line to the function body.
    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        self.body.push(CodeFragment::line(line));
        self
    }

    /// Add raw body content; relative indentation inside it is kept.
    pub fn body(mut self, content: impl Into<String>) -> Self {
        self.body.push(CodeFragment::verbatim(content));
        self
    }

    /// Add body fragments built elsewhere.
    pub fn body_fragments(mut self, fragments: impl IntoIterator<Item = CodeFragment>) -> Self {
        self.body.extend(fragments);
        self
    }

    fn signature(&self) -> String {
        let vis = if self.is_public { "pub " } else { "" };
        let async_kw = if self.is_async { "async " } else { "" };
        let generics = self
            .generics
            .as_ref()
            .map(|g| format!("<{}>", g))
            .unwrap_or_default();
        let params = self
            .params
            .iter()
            .map(Param::format)
            .collect::<Vec<_>>()
            .join(", ");

        match &self.return_type {
            Some(ret) => format!(
                "{}{}fn {}{}({}) -> {} {{",
                vis, async_kw, self.name, generics, params, ret
            ),
            None => format!(
                "{}{}fn {}{}({}) {{",
                vis, async_kw, self.name, generics, params
            ),
        }
    }

    /// Build the function as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Fn {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();

        if let Some(doc) = &self.doc {
            for line in doc.lines() {
                fragments.push(CodeFragment::doc(line));
            }
        }
        for attr in &self.attrs {
            fragments.push(CodeFragment::line(format!("#[{}]", attr)));
        }
        fragments.push(CodeFragment::braced(self.signature(), self.body.clone()));

        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_fn() {
        let f = Fn::new("init").build();
        assert_eq!(f, "pub fn init() {\n}\n");
    }

    #[test]
    fn test_fn_with_params() {
        let f = Fn::new("get")
            .async_()
            .param(Param::receiver("&self"))
            .param(Param::new("id", "Uuid"))
            .returns("Result<Option<User>>")
            .body_line("todo!()")
            .build();
        assert!(f.contains("pub async fn get(&self, id: Uuid) -> Result<Option<User>> {"));
        assert!(f.contains("    todo!()\n"));
    }

    #[test]
    fn test_private_generic_fn() {
        let f = Fn::new("rows")
            .private()
            .generics("V: SerializeRow")
            .param(Param::new("values", "V"))
            .build();
        assert!(f.starts_with("fn rows<V: SerializeRow>(values: V) {"));
    }

    #[test]
    fn test_fn_with_multiline_doc() {
        let f = Fn::new("stream")
            .doc("Stream a partition.\n\nNo cancellation.")
            .build();
        assert!(f.starts_with("/// Stream a partition.\n///\n/// No cancellation.\n"));
    }

    #[test]
    fn test_body_keeps_relative_indent() {
        let f = Fn::new("run")
            .body("if ok {\n    go();\n}")
            .build();
        assert_eq!(f, "pub fn run() {\n    if ok {\n        go();\n    }\n}\n");
    }
}
