//! Rust backend for cqlgen.
//!
//! Turns lowered tables into `scylla` DAO implementations and `serde` DTO
//! structs. [`Generator`] is the entry point; [`EmissionModel`] is the
//! per-table data every renderer and the boilerplate template read from.

mod emission;
mod generator;
mod naming;
mod rust_file;
mod type_mapper;

pub mod ast;
pub mod files;

pub use ast::{Field, Fn, Impl, Param, Struct};
pub use cqlgen_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};
pub use emission::{ColumnEmission, EmissionModel, KeyParam, SerializedEmission};
pub use generator::Generator;
pub use naming::RUST_NAMING;
pub use rust_file::{RawCode, RustFile, Use};
pub use type_mapper::RustTypeMapper;
