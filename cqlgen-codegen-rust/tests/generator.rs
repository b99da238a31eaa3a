//! End-to-end generation from configuration text to files on disk.

use cqlgen_codegen::{
    format::Passthrough,
    pipeline::Pipeline,
    testing::{FailingFormatter, fixtures, generate_to_temp, list_files},
};
use cqlgen_codegen_rust::{Generator, LanguageCodegen, PreviewFile};
use cqlgen_core::WriteResult;
use cqlgen_schema::PersistConfig;

fn generator(json: &str) -> Generator {
    let ctx = Pipeline::new().run(fixtures::config(json)).unwrap();
    Generator::from_context(ctx).unwrap().with_formatter(Passthrough)
}

fn content<'a>(files: &'a [PreviewFile], path: &str) -> &'a str {
    files
        .iter()
        .find(|f| f.path.to_str() == Some(path))
        .map(|f| f.content.as_str())
        .unwrap_or_else(|| panic!("{} not generated", path))
}

const TAGGED_EVENTS: &str = r#"{
  "keyspace": "ks",
  "package": "crate::dao",
  "ModelGeneration": {"Package": "crate::models", "Location": "models"},
  "tables": [
    {
      "modelName": "Event",
      "tableName": "events",
      "dao": "EventDao",
      "columns": [
        {"name": "id", "type": "uuid", "key": "partition"},
        {"name": "ts", "type": "timestamp", "key": "cluster-desc"},
        {"name": "tags", "type": "list<blob>", "deserializeTo": "Tag"}
      ]
    }
  ]
}"#;

#[test]
fn test_clustered_table_with_serialized_list() {
    let files = generator(TAGGED_EVENTS).preview().unwrap();
    assert_eq!(files.len(), 2);

    let dao = content(&files, "events_dao_gen.rs");
    assert!(dao.contains("PRIMARY KEY (id, ts)\n) WITH CLUSTERING ORDER BY (ts DESC)"));
    assert!(dao.contains("match to_vec(value) {"));
    assert!(dao.contains("from_slice::<Tag>(raw)"));
    assert!(dao.contains("use serde_json::{from_slice, to_vec};"));

    let dto = content(&files, "models/events_dto_gen.rs");
    assert!(dto.contains("pub tags: Vec<Tag>,"));
    assert!(dto.contains("use super::Tag;\n"));
    assert!(dto.contains("pub ts: Option<DateTime<Utc>>,"));
    assert!(!dto.contains("serde_json"));
}

#[test]
fn test_composite_partition_key() {
    let ir = fixtures::sample_ir();
    let generator = Generator::new(ir).unwrap().with_formatter(Passthrough);
    let files = generator.preview().unwrap();

    let dao = content(&files, "readings_dao_gen.rs");
    assert!(dao.contains("PRIMARY KEY ((sensor, day))\n)"));
    assert!(dao.contains("FROM app.readings WHERE sensor=? AND day=?"));
    assert!(!dao.contains("CLUSTERING"));
    assert!(dao.contains("sensor: &str"));
    assert!(dao.contains("day: i32"));
}

#[test]
fn test_full_key_lookup_binds_each_key_once() {
    let files = generator(fixtures::SAMPLE_CONFIG).preview().unwrap();
    let dao = content(&files, "events_dao_gen.rs");

    // Once in the keyed select, once in the delete.
    assert_eq!(dao.matches("WHERE tenant=? AND ts=? AND id=?").count(), 2);
    assert!(dao.contains("FROM app.events WHERE tenant=?\""));
    assert!(!dao.contains("ts=? AND ts=?"));
}

#[test]
fn test_empty_tables_rejected() {
    let err = r#"{"keyspace": "ks", "tables": []}"#
        .parse::<PersistConfig>()
        .unwrap_err();
    assert!(matches!(*err, cqlgen_schema::Error::NoTables { .. }));
}

#[test]
fn test_rendering_is_deterministic() {
    let first = generator(fixtures::SAMPLE_CONFIG).preview().unwrap();
    let second = generator(fixtures::SAMPLE_CONFIG).preview().unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.path, b.path);
        assert_eq!(a.content, b.content);
    }
}

#[test]
fn test_formatting_failure_writes_nothing() {
    let ir = fixtures::sample_ir();
    let generator = Generator::new(ir)
        .unwrap()
        .with_formatter(FailingFormatter::on("EventStream"));

    let dir = tempfile::TempDir::new().unwrap();
    let err = generator.generate(dir.path()).unwrap_err();

    assert!(err.to_string().contains("events_dao_gen.rs"));
    assert!(list_files(dir.path()).is_empty());
}

#[test]
fn test_generate_writes_every_table() {
    let generator = generator(fixtures::SAMPLE_CONFIG);
    let dir = generate_to_temp(|path| {
        generator.generate(path)?;
        Ok(())
    })
    .unwrap();

    assert_eq!(
        list_files(dir.path()),
        vec![
            "events_dao_gen.rs",
            "posts_dao_gen.rs",
            "readings_dao_gen.rs",
            "src/models/events_dto_gen.rs",
            "src/models/posts_dto_gen.rs",
            "src/models/readings_dto_gen.rs",
            "src/models/users_dto_gen.rs",
            "users_dao_gen.rs",
        ]
    );

    let rerun = generator.generate(dir.path()).unwrap();
    assert_eq!(rerun.files.len(), 8);
    assert!(
        rerun
            .files
            .iter()
            .all(|f| f.result == WriteResult::Unchanged)
    );
}

#[test]
fn test_boilerplate_precedes_stream_record() {
    let dir = tempfile::TempDir::new().unwrap();
    let template = dir.path().join("boilerplate.tmpl");
    std::fs::write(&template, "// shared helpers for {{ dao }}\n").unwrap();

    let json = format!(
        r#"{{
  "keyspace": "app",
  "package": "crate::dao",
  "boilerplate": {},
  "tables": [
    {{
      "modelName": "User",
      "tableName": "users",
      "dao": "UserDao",
      "columns": [{{"name": "id", "type": "uuid", "key": "partition"}}]
    }}
  ]
}}"#,
        serde_json::to_string(&template).unwrap()
    );

    let files = generator(&json).preview().unwrap();
    assert_eq!(files.len(), 1);

    let dao = &files[0].content;
    let boilerplate = dao.find("// shared helpers for UserDao").unwrap();
    let stream = dao.find("pub struct UserStream {").unwrap();
    assert!(boilerplate < stream);
}
