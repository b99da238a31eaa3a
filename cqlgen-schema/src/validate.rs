//! Structural validation of a parsed configuration.

use std::collections::HashMap;

use miette::SourceSpan;

use crate::{PersistConfig, Result, SourceContext, TableDefinition};

impl PersistConfig {
    /// Check the invariants every later stage relies on.
    ///
    /// Stops at the first problem: the configuration is unusable until it
    /// is fixed, so there is nothing to gain from collecting more.
    pub fn validate(&self, ctx: &SourceContext) -> Result<()> {
        if self.keyspace.trim().is_empty() {
            return Err(ctx.empty_field_error(
                "keyspace",
                "the configuration",
                ctx.find_string("keyspace", 0),
            ));
        }
        check_identifier(ctx, &self.keyspace, "keyspace", 0)?;

        if self.tables.is_empty() {
            return Err(ctx.no_tables_error());
        }

        let mut cursor = 0;
        for (index, table) in self.tables.iter().enumerate() {
            cursor = validate_table(ctx, table, index, cursor)?;
        }

        Ok(())
    }
}

/// Validate a single table; returns the source offset to resume searching from.
fn validate_table(
    ctx: &SourceContext,
    table: &TableDefinition,
    index: usize,
    cursor: usize,
) -> Result<usize> {
    let context = if table.table_name.is_empty() {
        format!("table #{}", index + 1)
    } else {
        format!("table '{}'", table.table_name)
    };

    let table_span = ctx
        .find_string(&table.table_name, cursor)
        .filter(|_| !table.table_name.is_empty());
    let table_start = table_span.map(|s| s.offset()).unwrap_or(cursor);

    for (field, value) in [
        ("tableName", &table.table_name),
        ("modelName", &table.model_name),
        ("dao", &table.dao_name),
    ] {
        if value.trim().is_empty() {
            return Err(ctx.empty_field_error(field, context, table_span));
        }
    }

    check_identifier(ctx, &table.table_name, "table", table_start)?;
    check_identifier(ctx, &table.model_name, "model", cursor)?;
    check_identifier(ctx, &table.dao_name, "dao", cursor)?;

    if table.columns.is_empty() {
        return Err(ctx.no_columns_error(&table.table_name, table_span));
    }

    let mut seen: HashMap<&str, SourceSpan> = HashMap::new();
    let mut column_cursor = table_start;
    for column in &table.columns {
        let column_context = format!("a column of {}", context);
        if column.name.trim().is_empty() {
            return Err(ctx.empty_field_error("name", column_context, table_span));
        }

        let span = ctx
            .find_string(&column.name, column_cursor)
            .unwrap_or_else(|| SourceSpan::from((column_cursor, 0)));
        column_cursor = span.offset() + span.len();

        if column.storage_type.trim().is_empty() {
            return Err(ctx.empty_field_error("type", column_context, Some(span)));
        }
        check_identifier(ctx, &column.name, "column", span.offset().saturating_sub(1))?;

        if let Some(first) = seen.get(column.name.as_str()) {
            return Err(ctx.duplicate_column_error(
                &table.table_name,
                &column.name,
                *first,
                span,
            ));
        }
        seen.insert(&column.name, span);
    }

    if !table.has_partition_key() {
        return Err(ctx.no_partition_key_error(&table.table_name, table_span));
    }

    Ok(column_cursor)
}

fn check_identifier(ctx: &SourceContext, name: &str, kind: &str, from: usize) -> Result<()> {
    match validate_identifier(name) {
        None => Ok(()),
        Some(reason) => Err(ctx.invalid_identifier_error(
            name,
            kind,
            reason,
            ctx.find_string(name, from),
        )),
    }
}

/// Returns None if `name` is usable as both a CQL and a Rust identifier,
/// Some(reason) otherwise.
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        None => return Some("name cannot be empty"),
        Some(c) if !c.is_ascii_alphabetic() => {
            return Some("name must start with a letter");
        }
        Some(_) => {}
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
        return Some("name contains invalid characters");
    }

    None
}
