use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for schema operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Carries the raw JSON text and the filename so validation can point
/// miette labels at the offending table or column.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Find the span of a quoted JSON string value, searching from `from`.
    ///
    /// The span covers the text between the quotes.
    pub fn find_string(&self, value: &str, from: usize) -> Option<SourceSpan> {
        let needle = format!("\"{}\"", value);
        let haystack = self.src.get(from..)?;
        haystack
            .find(&needle)
            .map(|pos| SourceSpan::from((from + pos + 1, value.len())))
    }

    /// Create a parse error from a serde_json error.
    pub fn parse_error(&self, source: serde_json::Error) -> Box<Error> {
        let span = line_col_offset(&self.src, source.line(), source.column())
            .map(|offset| SourceSpan::from((offset, 0)));
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create an error for a configuration without tables.
    pub fn no_tables_error(&self) -> Box<Error> {
        Box::new(Error::NoTables {
            src: self.named_source(),
            span: self.find_string("tables", 0),
        })
    }

    /// Create an error for a table without columns.
    pub fn no_columns_error(&self, table: &str, span: Option<SourceSpan>) -> Box<Error> {
        Box::new(Error::NoColumns {
            src: self.named_source(),
            span,
            table: table.to_string(),
        })
    }

    /// Create an error for a table without a partition key.
    pub fn no_partition_key_error(&self, table: &str, span: Option<SourceSpan>) -> Box<Error> {
        Box::new(Error::NoPartitionKey {
            src: self.named_source(),
            span,
            table: table.to_string(),
        })
    }

    /// Create a duplicate column error.
    pub fn duplicate_column_error(
        &self,
        table: &str,
        column: &str,
        first_span: SourceSpan,
        second_span: SourceSpan,
    ) -> Box<Error> {
        Box::new(Error::DuplicateColumn {
            src: self.named_source(),
            first_span,
            second_span,
            table: table.to_string(),
            column: column.to_string(),
        })
    }

    /// Create an error for a required field left empty.
    pub fn empty_field_error(
        &self,
        field: &str,
        context: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::EmptyField {
            src: self.named_source(),
            span,
            field: field.to_string(),
            context: context.into(),
        })
    }

    /// Create an invalid identifier error.
    pub fn invalid_identifier_error(
        &self,
        name: &str,
        context: impl Into<String>,
        reason: &str,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span,
            name: name.to_string(),
            context: context.into(),
            reason: reason.to_string(),
        })
    }
}

/// Convert a 1-based line/column pair into a byte offset.
fn line_col_offset(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    Some((line_start + column.saturating_sub(1)).min(src.len()))
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(cqlgen::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not find '{name}'")]
    #[diagnostic(
        code(cqlgen::config_not_found),
        help("looked in {searched}; run cqlgen from the project root or pass --config")
    )]
    NotFound { name: String, searched: String },

    #[error("'{path}' is empty")]
    #[diagnostic(code(cqlgen::empty_file))]
    EmptyFile { path: PathBuf },

    #[error("failed to parse table schema")]
    #[diagnostic(code(cqlgen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("at least one table must be defined")]
    #[diagnostic(
        code(cqlgen::no_tables),
        help("add an entry to the \"tables\" array")
    )]
    NoTables {
        #[source_code]
        src: NamedSource<String>,
        #[label("no tables here")]
        span: Option<SourceSpan>,
    },

    #[error("table '{table}' has no columns defined")]
    #[diagnostic(code(cqlgen::no_columns))]
    NoColumns {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: Option<SourceSpan>,
        table: String,
    },

    #[error("table '{table}' has no partition key")]
    #[diagnostic(
        code(cqlgen::no_partition_key),
        help("mark at least one column with \"key\": \"partition\"")
    )]
    NoPartitionKey {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: Option<SourceSpan>,
        table: String,
    },

    #[error("duplicate column '{column}' in table '{table}'")]
    #[diagnostic(code(cqlgen::duplicate_column))]
    DuplicateColumn {
        #[source_code]
        src: NamedSource<String>,
        #[label("first defined here")]
        first_span: SourceSpan,
        #[label("defined again here")]
        second_span: SourceSpan,
        table: String,
        column: String,
    },

    #[error("'{field}' must not be empty in {context}")]
    #[diagnostic(code(cqlgen::empty_field))]
    EmptyField {
        #[source_code]
        src: NamedSource<String>,
        #[label("empty value")]
        span: Option<SourceSpan>,
        field: String,
        context: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(help(
        "{reason}. Use only letters, numbers, and underscores, starting with a letter."
    ))]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_offset() {
        let src = "{\n  \"a\": 1,\n  \"b\"\n}";
        assert_eq!(line_col_offset(src, 1, 1), Some(0));
        assert_eq!(line_col_offset(src, 2, 3), Some(4));
        assert_eq!(line_col_offset(src, 0, 0), None);
        assert_eq!(line_col_offset(src, 99, 99), Some(src.len()));
    }

    #[test]
    fn test_find_string_skips_to_offset() {
        let ctx = SourceContext::new(r#"["id", "ts", "id"]"#, "test.json");
        let first = ctx.find_string("id", 0).unwrap();
        let second = ctx.find_string("id", first.offset() + 1).unwrap();
        assert_eq!(first.offset(), 2);
        assert_eq!(second.offset(), 14);
        assert_eq!(second.len(), 2);
    }
}
