//! Lower phase - builds the IR from the configuration.

use cqlgen_ir::{ColumnModel, ImportFlags, ModelTarget, PersistIR, StorageType, TableModel};
use cqlgen_schema::{PersistConfig, TableDefinition};
use eyre::{Result, WrapErr};

use crate::{
    Error,
    keys::build_key_structure,
    mapping::map_column,
    pipeline::{CompilationContext, Phase},
};

/// Phase that turns every table definition into a [`TableModel`].
pub struct LowerPhase;

impl Phase for LowerPhase {
    fn name(&self) -> &'static str {
        "lower"
    }

    fn description(&self) -> &'static str {
        "Derive key structures and map column types"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        ctx.ir = Some(lower_config(&ctx.config)?);
        Ok(())
    }
}

fn lower_config(config: &PersistConfig) -> Result<PersistIR> {
    let tables = config
        .tables
        .iter()
        .map(lower_table)
        .collect::<Result<Vec<_>>>()?;

    Ok(PersistIR {
        keyspace: config.keyspace.clone(),
        package: config.target_package.clone(),
        boilerplate: config.boilerplate_path.clone(),
        additional_imports: config.additional_imports.iter().cloned().collect(),
        model_package: config.model_import_alias.clone(),
        model_target: config.model_generation.as_ref().map(|target| ModelTarget {
            package: target.package.clone(),
            location: target.location.clone(),
        }),
        tables,
    })
}

/// Lower a single table definition.
pub fn lower_table(table: &TableDefinition) -> Result<TableModel> {
    let keys = build_key_structure(&table.table_name, &table.columns)
        .map_err(|e| Error::configuration(e.to_string()))?;

    let mut imports = ImportFlags::default();
    let columns: Vec<ColumnModel> = table
        .columns
        .iter()
        .map(|column| {
            let storage = StorageType::parse(&column.storage_type);
            let mapping = map_column(&storage, column.deserialize_target.as_deref());
            imports |= mapping.imports;
            ColumnModel {
                name: column.name.clone(),
                storage_type: column.storage_type.clone(),
                storage,
                target: mapping.target,
                serialized: mapping.serialized,
            }
        })
        .collect();

    let definition_json = serde_json::to_string_pretty(table)
        .wrap_err_with(|| format!("failed to serialize table '{}'", table.table_name))?;

    tracing::debug!(
        table = %table.table_name,
        partition_keys = keys.partition_keys.len(),
        clustering_keys = keys.clustering_keys.len(),
        "lowered table"
    );

    Ok(TableModel {
        model_name: table.model_name.clone(),
        table_name: table.table_name.clone(),
        dao_name: table.dao_name.clone(),
        generated_name: table.artifact_name().to_string(),
        columns,
        keys,
        imports,
        definition_json,
    })
}
