//! Inherent `impl` blocks.

use cqlgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::Fn;

#[derive(Debug, Clone)]
pub struct Impl {
    type_name: String,
    methods: Vec<Fn>,
}

impl Impl {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            methods: Vec::new(),
        }
    }

    pub fn method(mut self, method: Fn) -> Self {
        self.methods.push(method);
        self
    }

    /// Build the impl block as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }

    /// Convert methods to code fragments, one blank line apart.
    fn methods_to_fragments(&self) -> Vec<CodeFragment> {
        self.methods
            .iter()
            .enumerate()
            .flat_map(|(i, method)| {
                let mut fragments = Vec::new();
                if i > 0 {
                    fragments.push(CodeFragment::Blank);
                }
                fragments.extend(method.to_fragments());
                fragments
            })
            .collect()
    }
}

impl Renderable for Impl {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::braced(
            format!("impl {} {{", self.type_name),
            self.methods_to_fragments(),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Param;

    #[test]
    fn test_empty_impl() {
        let i = Impl::new("UserDao").build();
        assert_eq!(i, "impl UserDao {\n}\n");
    }

    #[test]
    fn test_impl_with_methods() {
        let i = Impl::new("UserDao")
            .method(
                Fn::new("capacity")
                    .param(Param::receiver("&self"))
                    .returns("usize")
                    .body_line("16"),
            )
            .method(
                Fn::new("page_size")
                    .param(Param::receiver("&self"))
                    .returns("i32")
                    .body_line("100"),
            )
            .build();
        assert_eq!(
            i,
            "impl UserDao {\n    pub fn capacity(&self) -> usize {\n        16\n    }\n\n    pub fn page_size(&self) -> i32 {\n        100\n    }\n}\n"
        );
    }
}
