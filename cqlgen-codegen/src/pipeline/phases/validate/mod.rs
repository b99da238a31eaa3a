//! Lints over the parsed configuration.

mod lint;
pub mod lints;

use eyre::{Result, bail};
pub use lint::{Lint, LintInfo};
pub use lints::{
    DuplicateArtifactLint, FieldCollisionLint, IgnoredDeserializeTargetLint, UnmappedTypeLint,
};

use crate::pipeline::{CompilationContext, Phase};

/// Runs every registered lint; any error diagnostic fails the phase.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// The built-in lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(DuplicateArtifactLint),
                Box::new(FieldCollisionLint),
                Box::new(UnmappedTypeLint),
                Box::new(IgnoredDeserializeTargetLint),
            ],
        }
    }

    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.lints.iter().map(|l| l.info()).collect()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check the configuration and collect diagnostics"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        for lint in &self.lints {
            lint.check(&ctx.config, &mut ctx.diagnostics);
        }

        if ctx.has_errors() {
            bail!("validation failed with {} error(s)", ctx.error_count());
        }

        Ok(())
    }
}
