//! CQL storage types as written in the schema.
//!
//! Parsing goes one level deep: a scalar, one of the two blob
//! collections, or a list/set of a scalar. Anything else is kept verbatim as
//! [`StorageType::Unknown`] so it can be reported instead of rejected.

use serde::Serialize;

/// Scalar CQL types the generator knows how to map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Text,
    Uuid,
    TimeUuid,
    Int,
    Double,
    Timestamp,
    Blob,
}

impl ScalarType {
    /// Parse a scalar type name, ignoring case and surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let scalar = match raw.trim().to_ascii_lowercase().as_str() {
            "text" => ScalarType::Text,
            "uuid" => ScalarType::Uuid,
            "timeuuid" => ScalarType::TimeUuid,
            "int" => ScalarType::Int,
            "double" => ScalarType::Double,
            "timestamp" => ScalarType::Timestamp,
            "blob" => ScalarType::Blob,
            _ => return None,
        };
        Some(scalar)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarType::Text => "text",
            ScalarType::Uuid => "uuid",
            ScalarType::TimeUuid => "timeuuid",
            ScalarType::Int => "int",
            ScalarType::Double => "double",
            ScalarType::Timestamp => "timestamp",
            ScalarType::Blob => "blob",
        }
    }
}

/// Ordered or unordered single-element collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    List,
    Set,
}

/// A parsed column storage type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageType {
    Scalar { scalar: ScalarType },
    /// `list<blob>`, eligible for element deserialization
    BlobList,
    /// `map<text,blob>`, eligible for value deserialization
    BlobMap,
    Collection {
        collection: CollectionKind,
        element: ScalarType,
    },
    /// Type the generator cannot map; the raw text is kept
    Unknown { raw: String },
}

impl StorageType {
    /// Parse the `type` field of a column.
    ///
    /// Never fails: unsupported types come back as [`StorageType::Unknown`].
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_lowercase();

        if let Some(scalar) = ScalarType::parse(&normalized) {
            return StorageType::Scalar { scalar };
        }

        if let Some((outer, args)) = split_generic(&normalized) {
            match outer {
                "list" | "set" => {
                    if let Some(element) = ScalarType::parse(args) {
                        if outer == "list" && element == ScalarType::Blob {
                            return StorageType::BlobList;
                        }
                        let collection = if outer == "list" {
                            CollectionKind::List
                        } else {
                            CollectionKind::Set
                        };
                        return StorageType::Collection {
                            collection,
                            element,
                        };
                    }
                }
                "map" => {
                    if let Some((key, value)) = args.split_once(',')
                        && ScalarType::parse(key) == Some(ScalarType::Text)
                        && ScalarType::parse(value) == Some(ScalarType::Blob)
                    {
                        return StorageType::BlobMap;
                    }
                }
                _ => {}
            }
        }

        StorageType::Unknown {
            raw: raw.trim().to_string(),
        }
    }

    /// Whether the column can carry a deserialize target.
    pub fn is_blob_collection(&self) -> bool {
        matches!(self, StorageType::BlobList | StorageType::BlobMap)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, StorageType::Unknown { .. })
    }
}

/// Split `outer<args>` into its parts; `None` unless the whole string is one generic.
fn split_generic(s: &str) -> Option<(&str, &str)> {
    let open = s.find('<')?;
    let inner = s.get(open + 1..)?.strip_suffix('>')?;
    // One level only: `list<list<int>>` is not a collection of scalars.
    if inner.contains('<') || inner.contains('>') {
        return None;
    }
    Some((s[..open].trim(), inner.trim()))
}
