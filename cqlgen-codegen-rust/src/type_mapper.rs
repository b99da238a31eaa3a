//! Rust type mapper implementation.

use cqlgen_codegen::builder::TypeMapper;
use cqlgen_ir::{PrimitiveType, TypeRef};

/// Stand-in for storage types with no Rust mapping.
///
/// Never defined anywhere: generated code using it fails to compile at the
/// offending field.
pub const UNMAPPED_TYPE: &str = "UnmappedCqlType";

/// Maps IR types to Rust type syntax, in the form `scylla` reads and writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustTypeMapper;

impl TypeMapper for RustTypeMapper {
    fn map_primitive(&self, ty: PrimitiveType) -> String {
        match ty {
            PrimitiveType::String => "String".to_string(),
            PrimitiveType::Uuid => "Uuid".to_string(),
            PrimitiveType::Int32 => "i32".to_string(),
            PrimitiveType::Float64 => "f64".to_string(),
            PrimitiveType::Timestamp => "DateTime<Utc>".to_string(),
            PrimitiveType::Bytes => "Vec<u8>".to_string(),
        }
    }

    fn map_optional(&self, inner: &str) -> String {
        format!("Option<{}>", inner)
    }

    fn map_array(&self, inner: &str) -> String {
        format!("Vec<{}>", inner)
    }

    fn map_map(&self, key: &str, value: &str) -> String {
        format!("HashMap<{}, {}>", key, value)
    }

    fn map_unknown(&self, _raw: &str) -> String {
        UNMAPPED_TYPE.to_string()
    }
}

/// How a key column is taken as a query argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgType {
    /// Parameter type in the method signature
    pub ty: String,
    /// Whether the argument is a borrow that must be copied before moving into a task
    pub borrowed: bool,
}

impl RustTypeMapper {
    /// Parameter type for a key column.
    ///
    /// Key columns are never null, so the optional wrapper of identifiers and
    /// timestamps is dropped. Strings and byte buffers are borrowed; other
    /// scalars are `Copy` and passed by value.
    pub fn arg_type(&self, ty: &TypeRef) -> ArgType {
        match ty {
            TypeRef::Optional(inner) => self.arg_type(inner),
            TypeRef::Primitive(PrimitiveType::String) => ArgType {
                ty: "&str".to_string(),
                borrowed: true,
            },
            TypeRef::Primitive(PrimitiveType::Bytes) => ArgType {
                ty: "&[u8]".to_string(),
                borrowed: true,
            },
            TypeRef::Primitive(p) => ArgType {
                ty: self.map_primitive(*p),
                borrowed: false,
            },
            other => ArgType {
                ty: format!("&{}", self.render_type(other)),
                borrowed: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_primitives() {
        let mapper = RustTypeMapper;

        assert_eq!(mapper.map_primitive(PrimitiveType::String), "String");
        assert_eq!(mapper.map_primitive(PrimitiveType::Uuid), "Uuid");
        assert_eq!(mapper.map_primitive(PrimitiveType::Int32), "i32");
        assert_eq!(mapper.map_primitive(PrimitiveType::Float64), "f64");
        assert_eq!(
            mapper.map_primitive(PrimitiveType::Timestamp),
            "DateTime<Utc>"
        );
        assert_eq!(mapper.map_primitive(PrimitiveType::Bytes), "Vec<u8>");
    }

    #[test]
    fn test_rust_render_column_types() {
        let mapper = RustTypeMapper;

        let uuid = TypeRef::optional(TypeRef::primitive(PrimitiveType::Uuid));
        assert_eq!(mapper.render_type(&uuid), "Option<Uuid>");

        let blobs = TypeRef::array(TypeRef::bytes());
        assert_eq!(mapper.render_type(&blobs), "Vec<Vec<u8>>");

        let attrs = TypeRef::map(TypeRef::string(), TypeRef::bytes());
        assert_eq!(mapper.render_type(&attrs), "HashMap<String, Vec<u8>>");

        let times = TypeRef::array(TypeRef::primitive(PrimitiveType::Timestamp));
        assert_eq!(mapper.render_type(&times), "Vec<DateTime<Utc>>");

        assert_eq!(
            mapper.render_type(&TypeRef::Unknown("varint".into())),
            UNMAPPED_TYPE
        );
    }

    #[test]
    fn test_key_argument_types() {
        let mapper = RustTypeMapper;

        let uuid = mapper.arg_type(&TypeRef::optional(TypeRef::primitive(PrimitiveType::Uuid)));
        assert_eq!(uuid.ty, "Uuid");
        assert!(!uuid.borrowed);

        let text = mapper.arg_type(&TypeRef::string());
        assert_eq!(text.ty, "&str");
        assert!(text.borrowed);

        assert_eq!(mapper.arg_type(&TypeRef::bytes()).ty, "&[u8]");
        assert_eq!(
            mapper.arg_type(&TypeRef::array(TypeRef::string())).ty,
            "&Vec<String>"
        );
    }
}
