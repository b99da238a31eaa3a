//! Report data structures for commands.
//!
//! Commands build reports, then render them to an [`Output`] target.

mod bake;
mod check;
mod output;

pub use bake::{BakeReport, GenerationResult, PreviewFile, WrittenFile};
pub use check::{CheckReport, TableSummary};
pub use output::{Output, Report, TerminalOutput};
