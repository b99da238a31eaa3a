//! Output helpers shared by the language backends.

mod imports;

pub use imports::ImportCollector;
