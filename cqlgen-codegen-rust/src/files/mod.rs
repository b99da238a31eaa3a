//! Generated artifacts.

mod dao_rs;
mod dto_rs;

pub use dao_rs::DaoRs;
pub use dto_rs::DtoRs;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "Code generated by cqlgen; DO NOT EDIT.";

/// Driver release the DAO code is written against.
pub const SCYLLA_REQUIREMENT: &str =
    "Requires scylla 0.14 with the `chrono-04` feature, tokio, futures and eyre.";

/// Header comment text: the generated marker, a description line and the
/// table definition the file was generated from.
fn header(description: &str, definition_json: &str) -> String {
    format!(
        "{}\n\n{}, generated from:\n{}",
        GENERATED_HEADER, description, definition_json
    )
}
