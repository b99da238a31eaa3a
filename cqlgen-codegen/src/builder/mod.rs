//! Code generation building blocks.
//!
//! Nodes implement [`Renderable`] and produce [`CodeFragment`]s, which a
//! [`CodeBuilder`] lays out at the configured [`Indent`]. [`TypeMapper`] turns
//! storage types into target-language type names.

mod code_builder;
mod indent;
mod renderable;
mod types;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};
pub use types::TypeMapper;
