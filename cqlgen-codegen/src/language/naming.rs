//! Naming conventions for target languages.

/// How schema names become identifiers in a target language.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Column name to field name (e.g. "userID" -> "user_id")
    pub column_to_field: fn(&str) -> String,
    /// Generated artifact name to file stem (e.g. "UserEvents" -> "user_events")
    pub artifact_to_file: fn(&str) -> String,
    /// Reserved words of the language
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g. "type" -> "r#type")
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    /// Transform a column name and make it safe to use as a field.
    pub fn field_name(&self, column: &str) -> String {
        let transformed = (self.column_to_field)(column);
        self.safe_name(&transformed)
    }

    /// File stem for a generated artifact; never escaped.
    pub fn file_stem(&self, artifact: &str) -> String {
        (self.artifact_to_file)(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suffix(s: &str) -> String {
        format!("{}_", s)
    }

    const TEST: NamingConvention = NamingConvention {
        column_to_field: str::to_lowercase,
        artifact_to_file: str::to_uppercase,
        reserved_words: &["type"],
        escape_reserved: suffix,
    };

    #[test]
    fn test_field_name_escapes_after_transform() {
        assert_eq!(TEST.field_name("Type"), "type_");
        assert_eq!(TEST.field_name("Body"), "body");
    }

    #[test]
    fn test_file_stem_not_escaped() {
        assert_eq!(TEST.file_stem("type"), "TYPE");
    }
}
