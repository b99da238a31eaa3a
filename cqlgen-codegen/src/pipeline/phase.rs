use eyre::Result;

use super::CompilationContext;

/// One step between a parsed configuration and a lowered model.
///
/// Phases share a [`CompilationContext`] and record non-fatal findings as
/// diagnostics on it. An `Err` ends the run.
pub trait Phase: Send + Sync {
    fn name(&self) -> &'static str;

    /// One-line summary, logged when the phase starts.
    fn description(&self) -> &'static str;

    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;
}
