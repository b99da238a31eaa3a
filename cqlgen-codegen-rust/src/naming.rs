//! Rust-specific naming conventions.

use cqlgen_codegen::language::NamingConvention;
use cqlgen_core::to_snake_case;

fn escape_rust_reserved(name: &str) -> String {
    match name {
        // Path keywords cannot be raw identifiers.
        "crate" | "self" | "Self" | "super" => format!("{}_", name),
        _ => format!("r#{}", name),
    }
}

/// Rust naming conventions.
pub const RUST_NAMING: NamingConvention = NamingConvention {
    column_to_field: to_snake_case,
    artifact_to_file: to_snake_case,
    reserved_words: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
        "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
        "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do",
        "final", "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
        "gen",
    ],
    escape_reserved: escape_rust_reserved,
};
