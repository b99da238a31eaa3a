//! Compilation pipeline for code generation.
//!
//! A [`Pipeline`] runs the phases between a parsed configuration and the
//! language backends:
//!
//! - Explicit phase boundaries (validate → lower)
//! - Unified diagnostics collection
//! - Shared state via [`CompilationContext`]
//!
//! # Example
//!
//! ```ignore
//! use cqlgen_codegen::pipeline::Pipeline;
//!
//! let ctx = Pipeline::new().run(config)?;
//! for diag in ctx.warnings() {
//!     tracing::warn!("{}", diag);
//! }
//!
//! let generator = cqlgen_codegen_rust::Generator::from_context(ctx)?;
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod runner;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use runner::Pipeline;
