use itertools::Itertools;

use quell_model::{JoinQuery, OrderBy};

use super::scope::Scope;
use crate::errors::CompileError;
use crate::sql::{ColumnsSelection, Dialect, SelectedColumn};
use crate::utils::to_column_name;

/// Build the SELECT list for the primary query and record what was selected.
///
/// Wildcard selection (`alias.*`) is the default; explicit enumeration kicks
/// in when a collation-sensitive ordering targets the primary query, because
/// a collated ORDER BY expression must be projectable. Dialects that require
/// it (Postgres) additionally get every ordered-by column of a non-primary
/// query appended, so the ORDER BY reference is legal even though the caller
/// never asked for the column.
pub(crate) fn build_select_list(
    source: &JoinQuery,
    primary_alias: &str,
    order_by: &[OrderBy],
    dialect: &dyn Dialect,
    scope: &mut Scope,
) -> Result<String, CompileError> {
    let primary = source.primary();
    let explicit = order_by
        .iter()
        .any(|entry| entry.query.is_same_instance(primary) && entry.collation.is_some());

    let mut items = Vec::new();
    if explicit {
        let columns: Vec<SelectedColumn> = primary
            .fields()
            .iter()
            .map(|field| {
                let column_name = to_column_name(field);
                let column_label = format!("{primary_alias}_{column_name}");
                SelectedColumn {
                    field_name: field.clone(),
                    column_name,
                    column_label,
                }
            })
            .collect();
        items.extend(
            columns
                .iter()
                .map(|c| format!("{primary_alias}.{} AS {}", c.column_name, c.column_label)),
        );
        scope.push_selection(ColumnsSelection::explicit(primary_alias, columns));
    } else {
        items.push(format!("{primary_alias}.*"));
        scope.push_selection(ColumnsSelection::wildcard(primary_alias));
    }

    if dialect.requires_projected_order_columns() {
        for entry in order_by {
            if entry.query.is_same_instance(primary) {
                continue;
            }
            let alias = scope
                .seen_alias(&entry.query)
                .map(str::to_owned)
                .ok_or_else(|| CompileError::UnknownOrderByQuery {
                    field: entry.field.clone(),
                })?;
            let column_name = to_column_name(&entry.field);
            if scope.label_for(&alias, &column_name).is_some() {
                continue;
            }
            let column_label = format!("{alias}_{column_name}");
            items.push(format!("{alias}.{column_name} AS {column_label}"));
            scope.push_selection(ColumnsSelection::explicit(
                &alias,
                vec![SelectedColumn {
                    field_name: entry.field.clone(),
                    column_name,
                    column_label,
                }],
            ));
        }
    }

    Ok(items.into_iter().join(", "))
}
