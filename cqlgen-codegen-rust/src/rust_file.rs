//! RustFile abstraction for structured Rust file generation.
//!
//! A file is a header comment, a block of `use` statements and body items
//! separated by blank lines.

use cqlgen_codegen::{
    builder::{CodeBuilder, CodeFragment, Indent, Renderable},
    generation::ImportCollector,
};

/// A Rust use statement.
#[derive(Debug, Clone)]
pub struct Use {
    module: String,
    symbols: Vec<String>,
}

impl Use {
    /// Create a use statement for a module.
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            symbols: Vec::new(),
        }
    }

    /// Add a symbol to import from the module.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbols.push(symbol.into());
        self
    }

    /// Add multiple symbols to import.
    pub fn symbols(mut self, symbols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.symbols.extend(symbols.into_iter().map(Into::into));
        self
    }

    fn format(&self) -> String {
        match self.symbols.as_slice() {
            [] => format!("use {};", self.module),
            [single] => format!("use {}::{};", self.module, single),
            many => format!("use {}::{{{}}};", self.module, many.join(", ")),
        }
    }
}

impl Renderable for Use {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::Line(self.format())]
    }
}

/// A structured representation of a Rust file.
///
/// ```ignore
/// let file = RustFile::new()
///     .header("Code generated by cqlgen; DO NOT EDIT.")
///     .imports(&imports)
///     .add(row_struct)
///     .add(dao_impl)
///     .render();
/// ```
#[derive(Default)]
pub struct RustFile {
    header: Vec<String>,
    uses: Vec<Use>,
    body: Vec<Vec<CodeFragment>>,
}

impl RustFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append header comment text; every line becomes one `//` line.
    pub fn header(mut self, text: &str) -> Self {
        self.header.extend(text.lines().map(str::to_string));
        self
    }

    pub fn use_stmt(mut self, use_stmt: Use) -> Self {
        self.uses.push(use_stmt);
        self
    }

    /// Add every import of a collector, in its order.
    pub fn imports(mut self, imports: &ImportCollector) -> Self {
        for (module, symbols) in imports.iter() {
            self.uses.push(Use::new(module).symbols(symbols.iter().cloned()));
        }
        self
    }

    /// Add a body element (any Renderable).
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    /// Add a body element only when present.
    pub fn add_opt<R: Renderable>(self, node: Option<R>) -> Self {
        match node {
            Some(node) => self.add(node),
            None => self,
        }
    }

    /// Render the file with Rust indentation (4 spaces).
    pub fn render(&self) -> String {
        self.render_with_indent(Indent::RUST)
    }

    pub fn render_with_indent(&self, indent: Indent) -> String {
        let mut builder = CodeBuilder::new(indent);

        for line in &self.header {
            builder.push_comment(line);
        }

        if !self.header.is_empty() && (!self.uses.is_empty() || !self.body.is_empty()) {
            builder.push_blank();
        }

        for use_stmt in &self.uses {
            builder.emit(use_stmt);
        }

        if !self.uses.is_empty() && !self.body.is_empty() {
            builder.push_blank();
        }

        for (i, fragments) in self.body.iter().enumerate() {
            if i > 0 {
                builder.push_blank();
            }
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
        }

        builder.build()
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.uses.is_empty() && self.body.is_empty()
    }
}

/// Raw code added to a file body as written.
#[derive(Debug, Clone)]
pub struct RawCode(String);

impl RawCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }
}

impl Renderable for RawCode {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::verbatim(self.0.trim_end())]
    }
}
