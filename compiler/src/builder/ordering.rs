use itertools::Itertools;

use quell_model::OrderBy;

use super::scope::Scope;
use crate::errors::CompileError;
use crate::sql::Dialect;
use crate::utils::to_column_name;

/// Compile the ORDER BY clause. Every entry must target a query that is part
/// of the join graph; an entry pointing elsewhere is an error rather than a
/// silent drop. The fragment starts with `"\n"` and is empty when no ordering
/// was requested.
pub(crate) fn build_order_clause(
    order_by: &[OrderBy],
    dialect: &dyn Dialect,
    scope: &Scope,
) -> Result<String, CompileError> {
    if order_by.is_empty() {
        return Ok(String::new());
    }
    let entries: Vec<String> = order_by
        .iter()
        .map(|entry| {
            let alias = scope.seen_alias(&entry.query).ok_or_else(|| {
                CompileError::UnknownOrderByQuery {
                    field: entry.field.clone(),
                }
            })?;
            let column_name = to_column_name(&entry.field);
            // Prefer the projection label when the column was explicitly
            // enumerated, so the ordering survives a dedup wrapper.
            let expr = match scope.label_for(alias, &column_name) {
                Some(label) => label.to_owned(),
                None => format!("{alias}.{column_name}"),
            };
            dialect.render_order_entry(&expr, entry)
        })
        .collect::<Result<_, _>>()?;
    Ok(format!("\nORDER BY {}", entries.into_iter().join(", ")))
}
