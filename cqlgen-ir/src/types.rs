//! Language-agnostic type references.

use std::ops::BitOrAssign;

use serde::Serialize;

/// A target type, independent of the language it will be rendered in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum TypeRef {
    Primitive(PrimitiveType),
    /// Value that may be absent (`Option<T>` in Rust)
    Optional(Box<TypeRef>),
    /// Ordered sequence (`Vec<T>` in Rust)
    Array(Box<TypeRef>),
    /// String-keyed or typed map
    Map {
        key: Box<TypeRef>,
        value: Box<TypeRef>,
    },
    /// User type referenced by name, e.g. a deserialize target
    Named(String),
    /// A storage type with no mapping; rendered as a sentinel
    Unknown(String),
}

impl TypeRef {
    pub fn primitive(ty: PrimitiveType) -> Self {
        Self::Primitive(ty)
    }

    pub fn optional(inner: TypeRef) -> Self {
        Self::Optional(Box::new(inner))
    }

    pub fn array(inner: TypeRef) -> Self {
        Self::Array(Box::new(inner))
    }

    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn string() -> Self {
        Self::Primitive(PrimitiveType::String)
    }

    pub fn bytes() -> Self {
        Self::Primitive(PrimitiveType::Bytes)
    }

    /// Whether the sentinel for an unmapped storage type appears anywhere in this type.
    pub fn contains_unknown(&self) -> bool {
        match self {
            Self::Unknown(_) => true,
            Self::Optional(inner) | Self::Array(inner) => inner.contains_unknown(),
            Self::Map { key, value } => key.contains_unknown() || value.contains_unknown(),
            Self::Primitive(_) | Self::Named(_) => false,
        }
    }

    /// Import flags needed to name this type.
    pub fn import_flags(&self) -> ImportFlags {
        match self {
            Self::Primitive(PrimitiveType::Uuid) => ImportFlags {
                uuid: true,
                ..Default::default()
            },
            Self::Primitive(PrimitiveType::Timestamp) => ImportFlags {
                time: true,
                ..Default::default()
            },
            Self::Optional(inner) | Self::Array(inner) => inner.import_flags(),
            Self::Map { key, value } => {
                let mut flags = ImportFlags {
                    collections: true,
                    ..Default::default()
                };
                flags |= key.import_flags();
                flags |= value.import_flags();
                flags
            }
            Self::Primitive(_) | Self::Named(_) | Self::Unknown(_) => ImportFlags::default(),
        }
    }
}

/// Primitive column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    String,
    Uuid,
    Int32,
    Float64,
    Timestamp,
    Bytes,
}

impl PrimitiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Uuid => "uuid",
            Self::Int32 => "int32",
            Self::Float64 => "float64",
            Self::Timestamp => "timestamp",
            Self::Bytes => "bytes",
        }
    }
}

/// Optional imports a generated file needs, unioned across its columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ImportFlags {
    /// Timestamps are used
    pub time: bool,
    /// Some column is (de)serialized through JSON
    pub json: bool,
    /// Identifiers are used
    pub uuid: bool,
    /// A map type is used
    pub collections: bool,
}

impl ImportFlags {
    pub fn any(&self) -> bool {
        self.time || self.json || self.uuid || self.collections
    }
}

impl BitOrAssign for ImportFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.time |= rhs.time;
        self.json |= rhs.json;
        self.uuid |= rhs.uuid;
        self.collections |= rhs.collections;
    }
}
