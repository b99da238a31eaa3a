use cqlgen_schema::PersistConfig;

use crate::pipeline::Diagnostic;

/// Name and summary of a registered lint.
#[derive(Debug, Clone)]
pub struct LintInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A check over a parsed configuration.
///
/// Structural problems are rejected while parsing; lints cover what is
/// legal but suspicious, or only wrong once names are mapped to code.
pub trait Lint: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn check(&self, config: &PersistConfig, diagnostics: &mut Vec<Diagnostic>);

    fn info(&self) -> LintInfo {
        LintInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
