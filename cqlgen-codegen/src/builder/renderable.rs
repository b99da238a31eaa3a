//! Fragments of generated code and the trait that produces them.
//!
//! Nodes describe their shape; the [`CodeBuilder`] owns indentation.
//!
//! [`CodeBuilder`]: super::CodeBuilder

#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// One line at the current indentation.
    Line(String),
    Blank,
    /// Multi-line text, re-indented line by line.
    Verbatim(String),
    /// `header` line, the body one level deeper, then a closing `}`.
    Braced {
        header: String,
        body: Vec<CodeFragment>,
    },
    /// A `///` doc comment.
    Doc(String),
}

impl CodeFragment {
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    pub fn blank() -> Self {
        Self::Blank
    }

    pub fn verbatim(s: impl Into<String>) -> Self {
        Self::Verbatim(s.into())
    }

    pub fn braced(header: impl Into<String>, body: Vec<CodeFragment>) -> Self {
        Self::Braced {
            header: header.into(),
            body,
        }
    }

    pub fn doc(s: impl Into<String>) -> Self {
        Self::Doc(s.into())
    }
}

/// Types that render into code fragments.
pub trait Renderable {
    fn to_fragments(&self) -> Vec<CodeFragment>;
}

impl Renderable for CodeFragment {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![self.clone()]
    }
}

impl<T: Renderable> Renderable for [T] {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.iter().flat_map(Renderable::to_fragments).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_flattens_fragments() {
        let items = [CodeFragment::line("a"), CodeFragment::blank()];
        assert_eq!(
            items.to_fragments(),
            vec![CodeFragment::Line("a".into()), CodeFragment::Blank]
        );
    }
}
