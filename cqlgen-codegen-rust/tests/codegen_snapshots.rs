//! Snapshot tests for Rust code generation.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use cqlgen_codegen::{format::Passthrough, testing::fixtures};
use cqlgen_codegen_rust::{Generator, LanguageCodegen};

/// Render the sample configuration without a formatter, keyed by path.
fn generate_files() -> Vec<(String, String)> {
    let generator = Generator::new(fixtures::sample_ir())
        .expect("sample configuration has no boilerplate")
        .with_formatter(Passthrough);

    generator
        .preview()
        .expect("sample configuration renders")
        .into_iter()
        .map(|f| (f.path.display().to_string(), f.content))
        .collect()
}

fn get_file<'a>(files: &'a [(String, String)], path: &str) -> &'a str {
    files
        .iter()
        .find(|(p, _)| p == path)
        .map(|(_, c)| c.as_str())
        .unwrap_or_else(|| panic!("{} not generated", path))
}

#[test]
fn test_users_dto() {
    let files = generate_files();
    insta::assert_snapshot!("users_dto", get_file(&files, "src/models/users_dto_gen.rs"));
}

#[test]
fn test_posts_dto_with_serialized_columns() {
    let files = generate_files();
    insta::assert_snapshot!("posts_dto", get_file(&files, "src/models/posts_dto_gen.rs"));
}

#[test]
fn test_users_dao() {
    let files = generate_files();
    insta::assert_snapshot!("users_dao", get_file(&files, "users_dao_gen.rs"));
}

#[test]
fn test_posts_dao_with_serialized_columns() {
    let files = generate_files();
    insta::assert_snapshot!("posts_dao", get_file(&files, "posts_dao_gen.rs"));
}
