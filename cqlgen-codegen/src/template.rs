//! A small, strict template engine for the boilerplate hook.
//!
//! Placeholders are `{{ path.to.value }}`, resolved against the JSON form of
//! the context. `\{{` produces a literal `{{`. There are no conditionals or
//! loops; anything that does not resolve to a string, number or bool is an
//! error rather than an empty string.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while parsing or rendering a template.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unterminated placeholder at {line}:{column}")]
    Unterminated { line: usize, column: usize },

    #[error("empty placeholder at {line}:{column}")]
    EmptyPlaceholder { line: usize, column: usize },

    #[error("invalid placeholder '{path}' at {line}:{column}")]
    InvalidPath {
        path: String,
        line: usize,
        column: usize,
    },

    #[error("'{path}' at {line}:{column} does not resolve to a value")]
    Unresolved {
        path: String,
        line: usize,
        column: usize,
    },

    #[error("'{path}' at {line}:{column} is not a string, number or bool")]
    NotScalar {
        path: String,
        line: usize,
        column: usize,
    },

    #[error("failed to serialize the template context")]
    Context(#[source] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder {
        path: Vec<String>,
        line: usize,
        column: usize,
    },
}

/// A parsed template, ready to render any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse template text.
    pub fn parse(text: &str) -> Result<Self, TemplateError> {
        let bytes = text.as_bytes();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut literal_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i] == b'\\' && bytes[i + 1..].starts_with(b"{{") {
                literal.push_str(&text[literal_start..i]);
                literal.push_str("{{");
                i += 3;
                literal_start = i;
                continue;
            }

            if !bytes[i..].starts_with(b"{{") {
                i += 1;
                continue;
            }

            literal.push_str(&text[literal_start..i]);
            let (line, column) = position(text, i);
            let body_start = i + 2;
            let close = text[body_start..]
                .find("}}")
                .filter(|&end| !text[body_start..body_start + end].contains("{{"))
                .ok_or(TemplateError::Unterminated { line, column })?;

            let raw = text[body_start..body_start + close].trim();
            if raw.is_empty() {
                return Err(TemplateError::EmptyPlaceholder { line, column });
            }
            let path: Vec<String> = raw.split('.').map(str::to_string).collect();
            if path.iter().any(|s| !is_path_segment(s)) {
                return Err(TemplateError::InvalidPath {
                    path: raw.to_string(),
                    line,
                    column,
                });
            }

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Placeholder { path, line, column });

            i = body_start + close + 2;
            literal_start = i;
        }

        literal.push_str(&text[literal_start..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Read and parse a template file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Render against any serializable context.
    pub fn render(&self, context: &impl Serialize) -> Result<String, TemplateError> {
        let value = serde_json::to_value(context).map_err(TemplateError::Context)?;
        self.render_value(&value)
    }

    /// Render against an already serialized context.
    pub fn render_value(&self, context: &Value) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { path, line, column } => {
                    let joined = || path.join(".");
                    let value = lookup(context, path).ok_or_else(|| TemplateError::Unresolved {
                        path: joined(),
                        line: *line,
                        column: *column,
                    })?;
                    match value {
                        Value::String(s) => out.push_str(s),
                        Value::Number(n) => out.push_str(&n.to_string()),
                        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
                        Value::Null | Value::Array(_) | Value::Object(_) => {
                            return Err(TemplateError::NotScalar {
                                path: joined(),
                                line: *line,
                                column: *column,
                            });
                        }
                    }
                }
            }
        }
        Ok(out)
    }

    /// Dotted paths of every placeholder, in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = String> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder { path, .. } => Some(path.join(".")),
            Segment::Literal(_) => None,
        })
    }
}

fn lookup<'a>(root: &'a Value, path: &[String]) -> Option<&'a Value> {
    path.iter().try_fold(root, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn is_path_segment(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// 1-based line and column of a byte offset.
fn position(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|p| p + 1).unwrap_or(0);
    (line, before[line_start..].chars().count() + 1)
}
