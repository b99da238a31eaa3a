//! Language-specific abstractions.

mod naming;
mod traits;

pub use naming::NamingConvention;
pub use traits::{GenerateResult, GeneratedPath, LanguageCodegen, PreviewFile};
