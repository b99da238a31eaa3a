//! Rendering [`TypeRef`] into a target language.

use cqlgen_ir::{PrimitiveType, TypeRef};

/// Trait for mapping types to language-specific representations.
///
/// Implement this trait to support a new target language's type system.
pub trait TypeMapper {
    /// Map a primitive type to the target language.
    fn map_primitive(&self, ty: PrimitiveType) -> String;

    /// Map an optional type (e.g., `Option<T>`).
    fn map_optional(&self, inner: &str) -> String;

    /// Map an array type (e.g., `Vec<T>`).
    fn map_array(&self, inner: &str) -> String;

    /// Map a map type (e.g., `HashMap<K, V>`).
    fn map_map(&self, key: &str, value: &str) -> String;

    /// Name of the type standing in for an unmapped storage type.
    fn map_unknown(&self, raw: &str) -> String;

    /// Map a user type name, e.g. a deserialize target.
    fn map_named(&self, name: &str) -> String {
        name.to_string()
    }

    /// Render a complete TypeRef to a string.
    fn render_type(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Primitive(p) => self.map_primitive(*p),
            TypeRef::Optional(inner) => {
                let inner_str = self.render_type(inner);
                self.map_optional(&inner_str)
            }
            TypeRef::Array(inner) => {
                let inner_str = self.render_type(inner);
                self.map_array(&inner_str)
            }
            TypeRef::Map { key, value } => {
                let key_str = self.render_type(key);
                let value_str = self.render_type(value);
                self.map_map(&key_str, &value_str)
            }
            TypeRef::Named(name) => self.map_named(name),
            TypeRef::Unknown(raw) => self.map_unknown(raw),
        }
    }
}
