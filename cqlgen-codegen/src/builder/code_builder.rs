//! Indentation-aware text buffer for generated code.

use super::{CodeFragment, Indent, Renderable};

/// Accumulates generated lines at a tracked indentation level.
///
/// ```
/// use cqlgen_codegen::builder::{CodeBuilder, CodeFragment};
///
/// let mut builder = CodeBuilder::rust();
/// builder.emit(&CodeFragment::braced(
///     "fn main() {",
///     vec![CodeFragment::line("println!(\"hi\");")],
/// ));
///
/// assert_eq!(builder.build(), "fn main() {\n    println!(\"hi\");\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    depth: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            depth: 0,
            indent,
            buffer: String::new(),
        }
    }

    pub fn rust() -> Self {
        Self::new(Indent::RUST)
    }

    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.pad();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Every line of `text` at the current depth; whitespace-only lines come out empty.
    pub fn push_verbatim(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            if line.trim().is_empty() {
                self.push_blank();
            } else {
                self.push_line(line);
            }
        }
        self
    }

    pub fn push_doc(&mut self, text: &str) -> &mut Self {
        self.push_prefixed("///", text)
    }

    pub fn push_comment(&mut self, text: &str) -> &mut Self {
        self.push_prefixed("//", text)
    }

    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Verbatim(s) => {
                self.push_verbatim(&s);
            }
            CodeFragment::Braced { header, body } => {
                self.push_line(&header);
                self.depth += 1;
                for f in body {
                    self.apply_fragment(f);
                }
                self.depth -= 1;
                self.push_line("}");
            }
            CodeFragment::Doc(text) => {
                self.push_doc(&text);
            }
        }
    }

    pub fn build(self) -> String {
        self.buffer
    }

    fn push_prefixed(&mut self, prefix: &str, text: &str) -> &mut Self {
        self.pad();
        self.buffer.push_str(prefix);
        if !text.is_empty() {
            self.buffer.push(' ');
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
        self
    }

    fn pad(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::rust()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments() {
        let mut builder = CodeBuilder::rust();
        builder
            .push_comment("generated")
            .push_comment("")
            .push_doc("A row");
        assert_eq!(builder.build(), "// generated\n//\n/// A row\n");
    }

    #[test]
    fn test_verbatim_keeps_relative_layout() {
        let mut builder = CodeBuilder::rust();
        builder.emit(&CodeFragment::braced(
            "mod m {",
            vec![CodeFragment::verbatim("const A: i32 = 1;\n\n    // nested\n")],
        ));
        assert_eq!(
            builder.build(),
            "mod m {\n    const A: i32 = 1;\n\n        // nested\n}\n"
        );
    }

    #[test]
    fn test_emit_nested_blocks() {
        let node = CodeFragment::braced(
            "impl Foo {",
            vec![CodeFragment::braced(
                "fn bar() {",
                vec![CodeFragment::line("todo!()")],
            )],
        );

        let mut builder = CodeBuilder::rust();
        builder.emit(&node);
        assert_eq!(
            builder.build(),
            "impl Foo {\n    fn bar() {\n        todo!()\n    }\n}\n"
        );
    }
}
