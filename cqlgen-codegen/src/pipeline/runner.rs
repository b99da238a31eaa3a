//! Pipeline orchestrator.

use cqlgen_schema::PersistConfig;
use eyre::Result;

use super::{
    CompilationContext, Phase, Severity,
    phases::{LowerPhase, ValidatePhase},
};

/// Runs the built-in phases (validate, lower) followed by any extra phases.
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { phases: Vec::new() }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Compile a configuration.
    ///
    /// Warnings are kept in the returned context; an error diagnostic or a
    /// failing phase stops the run.
    pub fn run(&self, config: PersistConfig) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(config);

        let builtin_phases: Vec<Box<dyn Phase>> =
            vec![Box::new(ValidatePhase::new()), Box::new(LowerPhase)];

        for phase in builtin_phases.iter().chain(self.phases.iter()) {
            run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn run_phase(phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
    let seen = ctx.diagnostics.len();
    tracing::debug!(phase = phase.name(), "{}", phase.description());

    let result = phase.run(ctx);

    for diagnostic in &ctx.diagnostics[seen..] {
        match diagnostic.severity {
            Severity::Error => tracing::error!(phase = phase.name(), "{}", diagnostic),
            Severity::Warning => tracing::warn!(phase = phase.name(), "{}", diagnostic),
            Severity::Info => tracing::debug!(phase = phase.name(), "{}", diagnostic),
        }
    }

    result?;
    tracing::debug!(phase = phase.name(), "phase finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::testing::fixtures;

    struct CountingPhase(Arc<AtomicUsize>);

    impl Phase for CountingPhase {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn description(&self) -> &'static str {
            "Count tables in the IR"
        }

        fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
            let tables = ctx.ir.as_ref().map(|ir| ir.tables.len()).unwrap_or(0);
            self.0.store(tables, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_pipeline_lowers_every_table() {
        let mut ctx = Pipeline::new()
            .run(fixtures::sample_config())
            .expect("pipeline should succeed");

        let ir = ctx.take_ir().unwrap();
        let names: Vec<&str> = ir.tables.iter().map(|t| t.table_name.as_str()).collect();
        assert_eq!(names, vec!["users", "events", "posts", "readings"]);
    }

    #[test]
    fn test_extra_phase_runs_after_lowering() {
        let counter = Arc::new(AtomicUsize::new(0));
        Pipeline::new()
            .phase(CountingPhase(counter.clone()))
            .run(fixtures::sample_config())
            .expect("pipeline should succeed");

        assert_eq!(counter.load(Ordering::SeqCst), 4);
    }
}
