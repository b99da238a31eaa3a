//! Source formatters applied to rendered artifacts before they are written.

use std::{
    io::Write,
    path::PathBuf,
    process::{Command, Stdio},
};

use thiserror::Error;

/// Errors from an external formatter.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to run '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("'{program}' produced output that is not UTF-8")]
    InvalidOutput { program: String },
}

/// Formats generated source text.
pub trait SourceFormatter {
    fn name(&self) -> &'static str;

    fn format(&self, source: &str) -> Result<String, FormatError>;
}

/// Pipes text through `rustfmt`.
#[derive(Debug, Clone)]
pub struct Rustfmt {
    program: PathBuf,
    edition: String,
}

impl Rustfmt {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("rustfmt"),
            edition: "2021".to_string(),
        }
    }

    /// Use a specific rustfmt binary.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }
}

impl Default for Rustfmt {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceFormatter for Rustfmt {
    fn name(&self) -> &'static str {
        "rustfmt"
    }

    fn format(&self, source: &str) -> Result<String, FormatError> {
        let program = self.program.display().to_string();
        let spawn_error = |source| FormatError::Spawn {
            program: program.clone(),
            source,
        };

        // Reading from stdin, rustfmt writes the result to stdout.
        let mut child = Command::new(&self.program)
            .args(["--edition", &self.edition])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .map_err(spawn_error)?;
        }

        let output = child.wait_with_output().map_err(spawn_error)?;
        if !output.status.success() {
            return Err(FormatError::Failed {
                program,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| FormatError::InvalidOutput { program })
    }
}

/// Leaves text untouched, for `--no-format` and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl SourceFormatter for Passthrough {
    fn name(&self) -> &'static str {
        "none"
    }

    fn format(&self, source: &str) -> Result<String, FormatError> {
        Ok(source.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough() {
        let text = "fn  main( ){}";
        assert_eq!(Passthrough.format(text).unwrap(), text);
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let formatter = Rustfmt::new().with_program("/nonexistent/cqlgen-rustfmt");
        let err = formatter.format("fn main() {}").unwrap_err();
        assert!(matches!(err, FormatError::Spawn { .. }));
        assert!(err.to_string().contains("/nonexistent/cqlgen-rustfmt"));
    }
}
