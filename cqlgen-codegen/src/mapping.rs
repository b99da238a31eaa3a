//! Storage type to target type mapping.
//!
//! | storage            | target                      |
//! |--------------------|-----------------------------|
//! | `text`             | string                      |
//! | `uuid`, `timeuuid` | optional uuid               |
//! | `int`              | int32                       |
//! | `double`           | float64                     |
//! | `timestamp`        | optional timestamp          |
//! | `blob`             | bytes                       |
//! | `list<blob>`       | array of bytes              |
//! | `map<text,blob>`   | map of string to bytes      |
//! | `list<T>`/`set<T>` | array of T, never optional  |
//! | anything else      | unknown sentinel            |

use cqlgen_ir::{
    ImportFlags, PrimitiveType, ScalarType, SerializedElement, SerializedShape, StorageType,
    TypeRef,
};

/// Result of mapping one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    /// Type the driver reads and writes for this column
    pub target: TypeRef,
    /// Set when a blob collection decodes into structured values
    pub serialized: Option<SerializedElement>,
    pub imports: ImportFlags,
}

/// Map a parsed storage type and optional deserialize target.
///
/// A deserialize target only has an effect on `list<blob>` and
/// `map<text,blob>`; see [`ignores_deserialize_target`].
pub fn map_column(storage: &StorageType, deserialize_target: Option<&str>) -> TypeMapping {
    let target = map_storage(storage);
    let deserialize_target = deserialize_target.map(str::trim).filter(|t| !t.is_empty());

    let serialized = match (storage, deserialize_target) {
        (StorageType::BlobList, Some(element)) => Some(SerializedElement {
            shape: SerializedShape::List,
            element_type: element.to_string(),
        }),
        (StorageType::BlobMap, Some(element)) => Some(SerializedElement {
            shape: SerializedShape::Map,
            element_type: element.to_string(),
        }),
        _ => None,
    };

    let mut imports = target.import_flags();
    imports.json = serialized.is_some();

    TypeMapping {
        target,
        serialized,
        imports,
    }
}

/// Whether a configured deserialize target will be ignored for this storage type.
pub fn ignores_deserialize_target(storage: &StorageType, deserialize_target: Option<&str>) -> bool {
    deserialize_target.is_some_and(|t| !t.trim().is_empty()) && !storage.is_blob_collection()
}

/// Map a storage type on its own.
pub fn map_storage(storage: &StorageType) -> TypeRef {
    match storage {
        StorageType::Scalar { scalar } => map_scalar(*scalar),
        StorageType::BlobList => TypeRef::array(TypeRef::bytes()),
        StorageType::BlobMap => TypeRef::map(TypeRef::string(), TypeRef::bytes()),
        StorageType::Collection { element, .. } => TypeRef::array(map_element(*element)),
        StorageType::Unknown { raw } => TypeRef::Unknown(raw.clone()),
    }
}

/// Top-level column: identifiers and timestamps may be absent.
fn map_scalar(scalar: ScalarType) -> TypeRef {
    match scalar {
        ScalarType::Uuid | ScalarType::TimeUuid | ScalarType::Timestamp => {
            TypeRef::optional(map_element(scalar))
        }
        _ => map_element(scalar),
    }
}

/// Collection element: never optional.
fn map_element(scalar: ScalarType) -> TypeRef {
    let primitive = match scalar {
        ScalarType::Text => PrimitiveType::String,
        ScalarType::Uuid | ScalarType::TimeUuid => PrimitiveType::Uuid,
        ScalarType::Int => PrimitiveType::Int32,
        ScalarType::Double => PrimitiveType::Float64,
        ScalarType::Timestamp => PrimitiveType::Timestamp,
        ScalarType::Blob => PrimitiveType::Bytes,
    };
    TypeRef::primitive(primitive)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(raw: &str) -> TypeMapping {
        map_column(&StorageType::parse(raw), None)
    }

    #[test]
    fn test_scalar_mapping() {
        assert_eq!(map("text").target, TypeRef::string());
        assert_eq!(
            map("uuid").target,
            TypeRef::optional(TypeRef::primitive(PrimitiveType::Uuid))
        );
        assert_eq!(map("timeuuid").target, map("uuid").target);
        assert_eq!(map("int").target, TypeRef::primitive(PrimitiveType::Int32));
        assert_eq!(
            map("double").target,
            TypeRef::primitive(PrimitiveType::Float64)
        );
        assert_eq!(map("blob").target, TypeRef::bytes());
    }

    #[test]
    fn test_flags_follow_types() {
        assert!(map("uuid").imports.uuid);
        assert!(map("timestamp").imports.time);
        assert!(map("map<text,blob>").imports.collections);
        assert!(!map("text").imports.any());
        assert!(!map("list<blob>").imports.json);
    }

    #[test]
    fn test_collection_elements_not_optional() {
        assert_eq!(
            map("set<uuid>").target,
            TypeRef::array(TypeRef::primitive(PrimitiveType::Uuid))
        );
        assert_eq!(
            map("list<timestamp>").target,
            TypeRef::array(TypeRef::primitive(PrimitiveType::Timestamp))
        );
        assert!(map("list<timestamp>").imports.time);
    }

    #[test]
    fn test_serialized_blob_list() {
        let mapping = map_column(&StorageType::BlobList, Some("Tag"));
        assert_eq!(mapping.target, TypeRef::array(TypeRef::bytes()));
        assert_eq!(
            mapping.serialized,
            Some(SerializedElement {
                shape: SerializedShape::List,
                element_type: "Tag".into(),
            })
        );
        assert!(mapping.imports.json);
    }

    #[test]
    fn test_serialized_blob_map() {
        let mapping = map_column(&StorageType::BlobMap, Some(" models::Attr "));
        let serialized = mapping.serialized.unwrap();
        assert_eq!(serialized.shape, SerializedShape::Map);
        assert_eq!(serialized.element_type, "models::Attr");
        assert!(mapping.imports.json && mapping.imports.collections);
    }

    #[test]
    fn test_deserialize_target_ignored_elsewhere() {
        let storage = StorageType::parse("text");
        let mapping = map_column(&storage, Some("Tag"));
        assert!(mapping.serialized.is_none());
        assert!(!mapping.imports.json);
        assert!(ignores_deserialize_target(&storage, Some("Tag")));
        assert!(!ignores_deserialize_target(&storage, None));
        assert!(!ignores_deserialize_target(&StorageType::BlobList, Some("Tag")));
    }

    #[test]
    fn test_blank_target_is_no_target() {
        let mapping = map_column(&StorageType::BlobList, Some("  "));
        assert!(mapping.serialized.is_none());
    }

    #[test]
    fn test_unknown_passes_raw() {
        assert_eq!(
            map("varint").target,
            TypeRef::Unknown("varint".into())
        );
    }
}
