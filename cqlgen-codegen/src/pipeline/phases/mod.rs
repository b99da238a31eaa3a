//! Built-in pipeline phases.
//!
//! - [`ValidatePhase`] - runs lints over the configuration
//! - [`LowerPhase`] - builds the IR for every table

mod lower;
mod validate;

pub use lower::{LowerPhase, lower_table};
pub use validate::{
    DuplicateArtifactLint, FieldCollisionLint, IgnoredDeserializeTargetLint, Lint, LintInfo,
    UnmappedTypeLint, ValidatePhase,
};
