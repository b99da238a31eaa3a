//! Compilation context passed through pipeline phases.

use cqlgen_ir::PersistIR;
use cqlgen_schema::PersistConfig;
use eyre::{Result, eyre};

use super::diagnostic::Diagnostic;

/// State of one compilation, accumulated phase by phase.
#[derive(Debug)]
pub struct CompilationContext {
    /// The configuration being compiled.
    pub config: PersistConfig,
    /// The lowered IR (populated by the lower phase).
    pub ir: Option<PersistIR>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(config: PersistConfig) -> Self {
        Self {
            config,
            ir: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_warning())
    }

    /// Take the IR out of the context.
    pub fn take_ir(&mut self) -> Result<PersistIR> {
        self.ir
            .take()
            .ok_or_else(|| eyre!("IR not set; did the lower phase run?"))
    }
}
