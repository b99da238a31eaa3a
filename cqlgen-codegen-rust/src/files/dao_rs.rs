use std::path::{Path, PathBuf};

use cqlgen_codegen::builder::CodeFragment;
use cqlgen_core::GeneratedFile;
use cqlgen_ir::SerializedShape;

use super::{SCYLLA_REQUIREMENT, header};
use crate::{
    EmissionModel, Field, Fn, Impl, KeyParam, Param, RUST_NAMING, RawCode, RustFile, Struct,
};

/// Binds `session` to the caller's session or to one opened for this call.
const SESSION_OR_OWNED: &str = "let owned;
let session = match session {
    Some(session) => session,
    None => {
        owned = self.create_session().await?;
        &owned
    }
};";

/// The DAO implementation of one table.
///
/// The DAO type itself is written by hand; it must be `Clone + Send + 'static`
/// and provide `create_session`, `capacity` and `page_size`.
pub struct DaoRs<'a> {
    model: &'a EmissionModel,
    boilerplate: Option<String>,
}

impl<'a> DaoRs<'a> {
    pub fn new(model: &'a EmissionModel) -> Self {
        Self {
            model,
            boilerplate: None,
        }
    }

    /// Rendered boilerplate, spliced in before the stream record type.
    pub fn with_boilerplate(mut self, boilerplate: Option<String>) -> Self {
        self.boilerplate = boilerplate.filter(|text| !text.trim().is_empty());
        self
    }

    fn file_name(&self) -> String {
        format!(
            "{}_dao_gen.rs",
            RUST_NAMING.file_stem(&self.model.generated_name)
        )
    }

    fn build_stream_struct(&self) -> Struct {
        let m = self.model;
        Struct::new(&m.stream_type)
            .doc(format!(
                "One entry of [`{}::stream`]: a row, or the error that ended the stream.",
                m.dao
            ))
            .field(Field::new("dto", format!("Option<{}>", m.model_type)))
            .field(Field::new("err", "Option<eyre::Report>"))
    }

    fn build_row_struct(&self) -> Struct {
        let fields = self
            .model
            .columns
            .iter()
            .map(|c| Field::new(&c.ident, &c.row_type).private());

        Struct::new(&self.model.row_type)
            .private()
            .attr("derive(scylla::FromRow)")
            .fields(fields)
    }

    fn build_statements(&self) -> RawCode {
        let m = self.model;
        let statements = [
            ("CREATE", &m.statements.create),
            ("INSERT", &m.statements.insert),
            ("SELECT_BY_KEY", &m.statements.select_by_key),
            ("SELECT_BY_PARTITION", &m.statements.select_by_partition),
            ("DELETE", &m.statements.delete),
        ];

        let consts: Vec<String> = statements
            .iter()
            .map(|(name, cql)| {
                format!(
                    "const {}: &str = {};",
                    m.const_name(name),
                    string_literal(cql)
                )
            })
            .collect();
        RawCode::new(consts.join("\n"))
    }

    fn build_impl(&self) -> Impl {
        Impl::new(&self.model.dao)
            .method(self.init_fn())
            .method(self.add_fn())
            .method(self.get_fn())
            .method(self.list_fn())
            .method(self.stream_fn())
            .method(self.delete_fn())
            .method(self.rows_fn())
            .method(self.model_from_row_fn())
    }

    fn init_fn(&self) -> Fn {
        Fn::new("init")
            .doc(format!(
                "Create `{}` if it does not exist.",
                self.model.qualified_table()
            ))
            .async_()
            .param(Param::receiver("&self"))
            .param(Param::new("session", "&Session"))
            .returns("Result<()>")
            .body(format!(
                "session.query_unpaged({}, ()).await?;\nOk(())",
                self.model.const_name("CREATE")
            ))
    }

    fn add_fn(&self) -> Fn {
        let m = self.model;
        let values: Vec<String> = m.columns.iter().map(|c| c.insert_value.clone()).collect();

        let mut body: Vec<CodeFragment> = m
            .serialized_columns()
            .filter_map(|c| {
                let s = c.serialized.as_ref()?;
                Some(CodeFragment::verbatim(serialize_block(
                    &m.qualified_table(),
                    &c.name,
                    &c.ident,
                    &c.local,
                    s.shape,
                )))
            })
            .collect();
        body.push(CodeFragment::verbatim(format!(
            "session.query_unpaged({}, {}).await?;\nOk(())",
            m.const_name("INSERT"),
            tuple(&values)
        )));

        Fn::new("add")
            .doc("Insert one row, encoding structured collections first.\n\nElements that fail to encode are logged and left out.")
            .async_()
            .param(Param::receiver("&self"))
            .param(Param::new("r", format!("&{}", m.model_type)))
            .param(Param::new("session", "&Session"))
            .returns("Result<()>")
            .body_fragments(body)
    }

    fn get_fn(&self) -> Fn {
        let m = self.model;
        let args: Vec<String> = m.all_keys.iter().map(|k| k.ident.clone()).collect();

        Fn::new("get")
            .doc("Look up one row by its full primary key.\n\nReturns `Ok(None)` when no row matches; more than one match is an error.")
            .async_()
            .param(Param::receiver("&self"))
            .params(key_params(&m.all_keys))
            .param(Param::new("session", "Option<&Session>"))
            .returns(format!("Result<Option<{}>>", m.model_type))
            .body(SESSION_OR_OWNED)
            .body(format!(
                "let mut rows = self\n    .rows(session, {}, {})\n    .await?;\nif rows.len() > 1 {{\n    bail!(\"{{}} rows in {} match one primary key\", rows.len());\n}}\nOk(rows.pop())",
                m.const_name("SELECT_BY_KEY"),
                tuple(&args),
                m.qualified_table()
            ))
    }

    fn list_fn(&self) -> Fn {
        let m = self.model;
        let args: Vec<String> = m.partition_keys.iter().map(|k| k.ident.clone()).collect();

        Fn::new("list")
            .doc("Read every row of one partition.")
            .async_()
            .param(Param::receiver("&self"))
            .params(key_params(&m.partition_keys))
            .param(Param::new("session", "Option<&Session>"))
            .returns(format!("Result<Vec<{}>>", m.model_type))
            .body(SESSION_OR_OWNED)
            .body(format!(
                "self.rows(session, {}, {}).await",
                m.const_name("SELECT_BY_PARTITION"),
                tuple(&args)
            ))
    }

    fn stream_fn(&self) -> Fn {
        let m = self.model;
        let table = m.qualified_table();
        let args: Vec<String> = m.partition_keys.iter().map(|k| k.ident.clone()).collect();

        let owned_args: String = m
            .partition_keys
            .iter()
            .filter(|k| k.owned != k.ident)
            .map(|k| format!("let {} = {};\n", k.ident, k.owned))
            .collect();

        let body = format!(
            r#"let (tx, rx) = mpsc::channel(self.capacity().max(1));
let dao = self.clone();
{owned_args}tokio::spawn(async move {{
    let session = match dao.create_session().await {{
        Ok(session) => session,
        Err(err) => {{
            tracing::error!(table = "{table}", error = %err, "failed to open a session for streaming");
            let _ = tx.send({stream} {{ dto: None, err: Some(err) }}).await;
            return;
        }}
    }};

    let query = Query::new({select}).with_page_size(dao.page_size());
    let mut rows = match session.query_iter(query, {values}).await {{
        Ok(rows) => rows.into_typed::<{row}>(),
        Err(err) => {{
            tracing::error!(table = "{table}", error = %err, "failed to stream rows");
            let _ = tx.send({stream} {{ dto: None, err: Some(err.into()) }}).await;
            return;
        }}
    }};

    while let Some(row) = rows.next().await {{
        match row {{
            Ok(row) => {{
                let dto = Self::model_from_row(row);
                let _ = tx.send({stream} {{ dto: Some(dto), err: None }}).await;
            }}
            Err(err) => {{
                tracing::error!(table = "{table}", error = %err, "failed to stream rows");
                let _ = tx.send({stream} {{ dto: None, err: Some(err.into()) }}).await;
                return;
            }}
        }}
    }}
}});
rx"#,
            owned_args = owned_args,
            table = table,
            stream = m.stream_type,
            select = m.const_name("SELECT_BY_PARTITION"),
            values = tuple(&args),
            row = m.row_type,
        );

        Fn::new("stream")
            .doc(format!(
                "Stream every row of one partition.\n\n\
                 Rows are read on a spawned task with its own session and pushed into a\n\
                 channel holding up to `capacity()` entries. A failure ends the stream\n\
                 with a single entry carrying the error.\n\n\
                 There is no cancellation: dropping the receiver does not stop the task,\n\
                 which keeps reading `{}` until the partition is exhausted.",
                table
            ))
            .param(Param::receiver("&self"))
            .params(key_params(&m.partition_keys))
            .returns(format!("mpsc::Receiver<{}>", m.stream_type))
            .body(body)
    }

    fn delete_fn(&self) -> Fn {
        let m = self.model;
        let values: Vec<String> = m.all_keys.iter().map(|k| k.from_model.clone()).collect();

        Fn::new("delete")
            .doc("Delete one row by its full primary key.")
            .async_()
            .param(Param::receiver("&self"))
            .param(Param::new("r", format!("&{}", m.model_type)))
            .param(Param::new("session", "Option<&Session>"))
            .returns("Result<()>")
            .body(SESSION_OR_OWNED)
            .body(format!(
                "session.query_unpaged({}, {}).await?;\nOk(())",
                m.const_name("DELETE"),
                tuple(&values)
            ))
    }

    fn rows_fn(&self) -> Fn {
        let m = self.model;
        Fn::new("rows")
            .private()
            .async_()
            .param(Param::receiver("&self"))
            .param(Param::new("session", "&Session"))
            .param(Param::new("cql", "&str"))
            .param(Param::new("values", "impl SerializeRow"))
            .returns(format!("Result<Vec<{}>>", m.model_type))
            .body(format!(
                "let query = Query::new(cql).with_page_size(self.page_size());\n\
                 let mut rows = session\n\
                 \x20   .query_iter(query, values)\n\
                 \x20   .await?\n\
                 \x20   .into_typed::<{}>();\n\
                 let mut models = Vec::new();\n\
                 while let Some(row) = rows.next().await {{\n\
                 \x20   models.push(Self::model_from_row(row?));\n\
                 }}\n\
                 Ok(models)",
                m.row_type
            ))
    }

    fn model_from_row_fn(&self) -> Fn {
        let m = self.model;

        let mut body: Vec<CodeFragment> = m
            .serialized_columns()
            .filter_map(|c| {
                let s = c.serialized.as_ref()?;
                Some(CodeFragment::verbatim(deserialize_block(
                    &c.ident,
                    &c.local,
                    s.shape,
                    &s.element_type,
                )))
            })
            .collect();

        let fields: Vec<CodeFragment> = m
            .columns
            .iter()
            .map(|c| {
                if c.from_row == c.ident {
                    CodeFragment::line(format!("{},", c.ident))
                } else {
                    CodeFragment::line(format!("{}: {},", c.ident, c.from_row))
                }
            })
            .collect();
        body.push(CodeFragment::braced(format!("{} {{", m.model_type), fields));

        Fn::new("model_from_row")
            .private()
            .param(Param::new("row", &m.row_type))
            .returns(m.model_type.clone())
            .body_fragments(body)
    }
}

impl GeneratedFile for DaoRs<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.file_name())
    }

    fn render(&self) -> String {
        let m = self.model;
        let description = format!(
            "{}\n\nDAO for table `{}` in module `{}`",
            SCYLLA_REQUIREMENT,
            m.qualified_table(),
            m.package
        );

        RustFile::new()
            .header(&header(&description, &m.definition_json))
            .imports(&m.dao_imports)
            .add_opt(self.boilerplate.as_ref().map(RawCode::new))
            .add(self.build_stream_struct())
            .add(self.build_row_struct())
            .add(self.build_statements())
            .add(self.build_impl())
            .render()
    }
}

fn key_params(keys: &[KeyParam]) -> Vec<Param> {
    keys.iter().map(|k| Param::new(&k.ident, &k.ty)).collect()
}

/// A tuple expression; a single value keeps its trailing comma.
fn tuple(values: &[String]) -> String {
    match values {
        [single] => format!("({},)", single),
        many => format!("({})", many.join(", ")),
    }
}

/// A string literal; CQL newlines are kept as real line breaks.
fn string_literal(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

fn serialize_block(
    table: &str,
    column: &str,
    ident: &str,
    local: &str,
    shape: SerializedShape,
) -> String {
    match shape {
        SerializedShape::Map => format!(
            r#"let mut {local} = HashMap::with_capacity(r.{ident}.len());
for (key, value) in &r.{ident} {{
    match to_vec(value) {{
        Ok(raw) => {{
            {local}.insert(key.clone(), raw);
        }}
        Err(err) => {{
            tracing::warn!(table = "{table}", column = "{column}", key = %key, error = %err, "skipping value that failed to encode");
        }}
    }}
}}"#
        ),
        SerializedShape::List => format!(
            r#"let mut {local} = Vec::with_capacity(r.{ident}.len());
for value in &r.{ident} {{
    match to_vec(value) {{
        Ok(raw) => {local}.push(raw),
        Err(err) => {{
            tracing::warn!(table = "{table}", column = "{column}", error = %err, "skipping element that failed to encode");
        }}
    }}
}}"#
        ),
    }
}

fn deserialize_block(ident: &str, local: &str, shape: SerializedShape, element: &str) -> String {
    match shape {
        SerializedShape::List => format!(
            r#"let raw_{local} = row.{ident}.unwrap_or_default();
let mut {local} = Vec::with_capacity(raw_{local}.len());
for raw in &raw_{local} {{
    if let Ok(value) = from_slice::<{element}>(raw) {{
        {local}.push(value);
    }}
}}"#
        ),
        SerializedShape::Map => format!(
            r#"let raw_{local} = row.{ident}.unwrap_or_default();
let mut {local} = HashMap::with_capacity(raw_{local}.len());
for (key, raw) in raw_{local} {{
    if let Ok(value) = from_slice::<{element}>(&raw) {{
        {local}.insert(key, value);
    }}
}}"#
        ),
    }
}
