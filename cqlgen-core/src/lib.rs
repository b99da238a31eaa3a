//! Core utilities and types for the cqlgen generator.
//!
//! This crate provides the file-writing primitives and identifier case
//! helpers shared by the schema, codegen and CLI crates.

mod file;
mod utils;

// File operations
pub use file::{File, GeneratedFile, WriteResult};
// String utilities
pub use utils::{lower_first, to_snake_case};
