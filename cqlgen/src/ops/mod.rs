//! Core operations.
//!
//! The logic behind each command, separated from argument parsing and
//! output rendering.

pub mod bake;
pub mod check;

pub use bake::{BakeOptions, bake};
pub use check::check;
