//! Built-in lints.

mod duplicate_artifact;
mod field_collision;
mod ignored_target;
mod unmapped_type;

pub use duplicate_artifact::DuplicateArtifactLint;
pub use field_collision::FieldCollisionLint;
pub use ignored_target::IgnoredDeserializeTargetLint;
pub use unmapped_type::UnmappedTypeLint;
