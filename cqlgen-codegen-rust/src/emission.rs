//! Per-table emission model.
//!
//! Everything the DAO and DTO renderers print is decided here, so the
//! renderers only arrange text. The model also serializes to the JSON
//! context the boilerplate template is evaluated against.

use cqlgen_codegen::{builder::TypeMapper, cql::Statements, generation::ImportCollector};
use cqlgen_core::{lower_first, to_snake_case};
use cqlgen_ir::{ColumnModel, ModelTarget, PersistIR, SerializedShape, TableModel};
use serde::Serialize;

use crate::{RUST_NAMING, RustTypeMapper, type_mapper::UNMAPPED_TYPE};

/// Locals used by generated method bodies; columns with these names get a suffix.
const RESERVED_LOCALS: &[&str] = &[
    "dao", "err", "key", "owned", "query", "r", "raw", "row", "rows", "rx", "session", "tx",
    "value",
];

/// Everything needed to render the artifacts of one table.
#[derive(Debug, Clone, Serialize)]
pub struct EmissionModel {
    pub keyspace: String,
    /// Module the DAO file belongs to
    pub package: String,
    /// Model struct name, e.g. `Event`
    pub model: String,
    /// Model type as written inside the DAO, e.g. `crate::models::Event`
    pub model_type: String,
    pub dao: String,
    /// Record type carried by the stream channel
    pub stream_type: String,
    /// Private struct rows are read into
    pub row_type: String,
    pub table: String,
    pub generated_name: String,
    /// Prefix of the CQL constants, e.g. `USER_EVENTS`
    pub const_prefix: String,
    pub statements: Statements,
    pub columns: Vec<ColumnEmission>,
    /// Arguments of `list` and `stream`
    pub partition_keys: Vec<KeyParam>,
    /// Arguments of `get`
    pub all_keys: Vec<KeyParam>,
    pub definition_json: String,
    /// Set when DTOs are generated for this run
    pub dto: Option<ModelTarget>,
    #[serde(skip)]
    pub dao_imports: ImportCollector,
    #[serde(skip)]
    pub dto_imports: ImportCollector,
}

/// One column as it appears in generated code.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnEmission {
    pub name: String,
    /// Field identifier on the row and model structs
    pub ident: String,
    /// Local binding for the serialized form of the field
    pub local: String,
    pub storage_type: String,
    /// Type of the field on the row struct; nullable unless the column is a key
    pub row_type: String,
    /// Expression producing the model field inside `model_from_row`
    pub from_row: String,
    /// Type of the field on the model, as seen from the DAO
    pub field_type: String,
    /// Type of the field in the DTO struct
    pub dto_type: String,
    /// JSON name of the DTO field
    pub serde_tag: String,
    /// Expression bound for this column in the insert statement
    pub insert_value: String,
    pub is_key: bool,
    /// The storage type has no Rust mapping
    pub unmapped: bool,
    pub serialized: Option<SerializedEmission>,
}

/// Structured decoding of a blob collection column.
#[derive(Debug, Clone, Serialize)]
pub struct SerializedEmission {
    pub shape: SerializedShape,
    /// Element type as configured, used inside the DAO
    pub element_type: String,
    /// Element type as named inside the DTO, after its import
    pub dto_element_type: String,
}

/// A key column taken as a method argument.
#[derive(Debug, Clone, Serialize)]
pub struct KeyParam {
    pub column: String,
    pub ident: String,
    pub ty: String,
    /// Expression turning the argument into an owned value
    pub owned: String,
    /// Expression reading the key from a model reference `r`
    pub from_model: String,
}

impl EmissionModel {
    pub fn build(ir: &PersistIR, table: &TableModel) -> Self {
        let mapper = RustTypeMapper;
        let model_package = ir
            .model_package
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());

        let model_type = match model_package {
            Some(package) => format!("{}::{}", package, table.model_name),
            None => table.model_name.clone(),
        };

        let columns: Vec<ColumnEmission> = table
            .columns
            .iter()
            .map(|column| column_emission(&mapper, table, column))
            .collect();

        let key_params = |names: &[String]| -> Vec<KeyParam> {
            table
                .key_columns(names)
                .map(|column| key_param(&mapper, column))
                .collect()
        };

        Self {
            keyspace: ir.keyspace.clone(),
            package: ir.package.clone(),
            model: table.model_name.clone(),
            model_type,
            dao: table.dao_name.clone(),
            stream_type: format!("{}Stream", table.model_name),
            row_type: format!("{}Row", table.model_name),
            table: table.table_name.clone(),
            generated_name: table.generated_name.clone(),
            const_prefix: to_snake_case(&table.table_name).to_uppercase(),
            statements: Statements::new(&ir.keyspace, table),
            partition_keys: key_params(&table.keys.partition_keys),
            all_keys: key_params(&table.keys.all_keys),
            definition_json: table.definition_json.clone(),
            dto: ir.model_target.clone(),
            dao_imports: dao_imports(ir, table),
            dto_imports: dto_imports(table, &columns),
            columns,
        }
    }

    /// Fully qualified table name.
    pub fn qualified_table(&self) -> String {
        format!("{}.{}", self.keyspace, self.table)
    }

    pub fn serialized_columns(&self) -> impl Iterator<Item = &ColumnEmission> {
        self.columns.iter().filter(|c| c.serialized.is_some())
    }

    /// Name of one of the CQL constants, e.g. `EVENTS_INSERT`.
    pub fn const_name(&self, statement: &str) -> String {
        format!("{}_{}", self.const_prefix, statement)
    }
}

fn column_emission(
    mapper: &RustTypeMapper,
    table: &TableModel,
    column: &ColumnModel,
) -> ColumnEmission {
    let ident = RUST_NAMING.field_name(&column.name);
    let local = local_ident(&ident);
    let is_key = table.keys.is_key(&column.name);
    let model_field_type = mapper.render_type(&column.target);

    let serialized = column.serialized.as_ref().map(|s| SerializedEmission {
        shape: s.shape,
        element_type: s.element_type.clone(),
        dto_element_type: dto_element_name(&s.element_type).to_string(),
    });

    let (field_type, dto_type) = match &serialized {
        Some(s) => (
            collection_of(s.shape, &s.element_type),
            collection_of(s.shape, &s.dto_element_type),
        ),
        None => (model_field_type.clone(), model_field_type.clone()),
    };

    // The driver reports unset columns and empty collections as null.
    let nullable = is_key || model_field_type.starts_with("Option<");
    let (row_type, from_row) = match (&serialized, nullable) {
        (Some(_), _) => (format!("Option<{}>", model_field_type), local.clone()),
        (None, true) => (model_field_type.clone(), format!("row.{}", ident)),
        (None, false) => (
            format!("Option<{}>", model_field_type),
            format!("row.{}.unwrap_or_default()", ident),
        ),
    };

    let insert_value = if serialized.is_some() {
        format!("&{}", local)
    } else {
        format!("&r.{}", ident)
    };

    ColumnEmission {
        name: column.name.clone(),
        storage_type: column.storage_type.clone(),
        unmapped: model_field_type == UNMAPPED_TYPE,
        is_key,
        serde_tag: lower_first(&column.name),
        ident,
        local,
        row_type,
        from_row,
        field_type,
        dto_type,
        insert_value,
        serialized,
    }
}

fn key_param(mapper: &RustTypeMapper, column: &ColumnModel) -> KeyParam {
    let field = RUST_NAMING.field_name(&column.name);
    let ident = local_ident(&field);
    let arg = mapper.arg_type(&column.target);

    let owned = if !arg.borrowed {
        ident.clone()
    } else if arg.ty == "&str" {
        format!("{}.to_owned()", ident)
    } else if arg.ty == "&[u8]" {
        format!("{}.to_vec()", ident)
    } else {
        format!("{}.clone()", ident)
    };

    KeyParam {
        column: column.name.clone(),
        from_model: format!("&r.{}", field),
        ident,
        ty: arg.ty,
        owned,
    }
}

fn local_ident(ident: &str) -> String {
    if RESERVED_LOCALS.contains(&ident) {
        format!("{}_value", ident)
    } else {
        ident.to_string()
    }
}

fn collection_of(shape: SerializedShape, element: &str) -> String {
    match shape {
        SerializedShape::List => format!("Vec<{}>", element),
        SerializedShape::Map => format!("HashMap<String, {}>", element),
    }
}

/// Last segment of a plain `a::b::C` path; anything generic is kept whole.
fn dto_element_name(element_type: &str) -> &str {
    if element_type.contains('<') {
        return element_type;
    }
    element_type
        .rsplit_once("::")
        .map_or(element_type, |(_, name)| name)
}

/// Import of a deserialize target into the DTO file.
///
/// DTO files are child modules of the model module: qualified paths are
/// imported as written, bare names from `super`.
fn add_element_import(imports: &mut ImportCollector, element_type: &str) {
    if element_type.contains('<') {
        return;
    }
    if element_type.contains("::") {
        imports.add_path(element_type);
    } else if element_type.starts_with(|c: char| c.is_ascii_uppercase())
        && !PRELUDE_TYPES.contains(&element_type)
    {
        imports.add("super", element_type);
    }
}

const PRELUDE_TYPES: &[&str] = &["String", "Vec", "Option", "Box"];

fn dao_imports(ir: &PersistIR, table: &TableModel) -> ImportCollector {
    let mut imports = ImportCollector::new();
    imports.add("eyre", "Result");
    imports.add("eyre", "bail");
    imports.add("futures", "StreamExt");
    imports.add("scylla", "Session");
    imports.add("scylla::query", "Query");
    imports.add("scylla::serialize::row", "SerializeRow");
    imports.add("tokio::sync", "mpsc");

    add_flag_imports(&mut imports, table);
    if table.imports.json {
        imports.add("serde_json", "from_slice");
        imports.add("serde_json", "to_vec");
    }

    for path in &ir.additional_imports {
        imports.add_path(path);
    }
    imports
}

fn dto_imports(table: &TableModel, columns: &[ColumnEmission]) -> ImportCollector {
    let mut imports = ImportCollector::new();
    imports.add("serde", "Deserialize");
    imports.add("serde", "Serialize");
    add_flag_imports(&mut imports, table);
    for serialized in columns.iter().filter_map(|c| c.serialized.as_ref()) {
        add_element_import(&mut imports, &serialized.element_type);
    }
    imports
}

fn add_flag_imports(imports: &mut ImportCollector, table: &TableModel) {
    if table.imports.time {
        imports.add("chrono", "DateTime");
        imports.add("chrono", "Utc");
    }
    if table.imports.uuid {
        imports.add("uuid", "Uuid");
    }
    if table.imports.collections {
        imports.add("std::collections", "HashMap");
    }
}
