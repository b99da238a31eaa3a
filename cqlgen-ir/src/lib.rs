//! Intermediate representation types for the cqlgen DAO generator.
//!
//! The IR sits between the parsed configuration and the language backends:
//!
//! ```text
//! persist-config.json → cqlgen-schema (parsing) → cqlgen-ir (lowered tables) → codegen
//! ```
//!
//! Everything here is language-agnostic. Storage types are parsed into
//! [`StorageType`], column types are expressed as [`TypeRef`], and each table
//! carries its derived [`KeyStructure`] so backends never re-derive keys.

mod storage;
mod table;
mod types;

pub use storage::{CollectionKind, ScalarType, StorageType};
pub use table::{
    ClusteringOrder, ColumnModel, KeyStructure, ModelTarget, PersistIR, SerializedElement,
    SerializedShape, TableModel,
};
pub use types::{ImportFlags, PrimitiveType, TypeRef};
