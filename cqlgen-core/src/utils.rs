//! Identifier case helpers for generated code.

/// Convert a string to snake_case (e.g., "userID" -> "user_id").
///
/// Runs of capitals are kept together, so acronyms only split where
/// a lowercase letter follows them.
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' {
            result.push('_');
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && prev != '_' && prev != '-' {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }

    result
}

/// Lowercase the first character, leaving the rest untouched
/// (e.g., "CreatedAt" -> "createdAt").
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("Id"), "id");
        assert_eq!(to_snake_case("CreatedAt"), "created_at");
        assert_eq!(to_snake_case("userId"), "user_id");
        assert_eq!(to_snake_case("userID"), "user_id");
        assert_eq!(to_snake_case("HTTPStatus"), "http_status");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case("user-event"), "user_event");
        assert_eq!(to_snake_case("v2Token"), "v2_token");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn test_lower_first() {
        assert_eq!(lower_first("CreatedAt"), "createdAt");
        assert_eq!(lower_first("id"), "id");
        assert_eq!(lower_first("ID"), "iD");
        assert_eq!(lower_first(""), "");
    }
}
