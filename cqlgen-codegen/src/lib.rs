//! Shared code generation utilities for the cqlgen DAO generator.
//!
//! This crate holds everything that does not depend on the target language:
//! turning a validated configuration into IR, deriving key structures and CQL
//! statements, the boilerplate template engine and the formatter seam.
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, TypeMapper)
//! - [`generation`] - Output helpers (ImportCollector)
//! - [`language`] - Naming conventions and the generator trait
//! - [`mapping`] - Storage type to target type mapping
//! - [`keys`] - Key structure and the CQL clauses built from it
//! - [`cql`] - Complete CQL statements per table
//! - [`template`] - Boilerplate template engine
//! - [`format`] - Source formatters
//! - [`pipeline`] - Validate and lower phases
//! - [`testing`] - Test utilities (feature-gated)

pub mod builder;
pub mod cql;
mod error;
pub mod format;
pub mod generation;
pub mod keys;
pub mod language;
pub mod mapping;
pub mod pipeline;
pub mod template;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::Error;
