use itertools::Itertools;

use quell_model::{
    Condition, ConditionsLocation, ExistsKind, FieldCondition, JoinQuery, Query, RestrictionKind,
    Value,
};

use super::constants::{LENGTH_FUNCTION, PK_COLUMN};
use super::scope::Scope;
use crate::errors::CompileError;
use crate::utils::to_column_name;

/// Compile one query's condition list into a SQL fragment, binding every
/// value to a generated parameter. Conditions are joined with `AND`; column
/// references are qualified with `alias`.
pub(crate) fn build_filter(
    query: &Query,
    alias: &str,
    scope: &mut Scope,
) -> Result<String, CompileError> {
    let rendered: Vec<String> = query
        .conditions()
        .iter()
        .map(|condition| render_condition(condition, alias, query.table_name(), scope))
        .collect::<Result<_, _>>()?;
    Ok(rendered.join(" AND "))
}

fn render_condition(
    condition: &Condition,
    alias: &str,
    table: &str,
    scope: &mut Scope,
) -> Result<String, CompileError> {
    match condition {
        Condition::Field(fc) => render_field_condition(fc, alias, table, scope),
        Condition::Disjunction(disjunction) => {
            let branches: Vec<String> = disjunction
                .live_branches()
                .map(|branch| {
                    let filter = build_filter(branch, alias, scope)?;
                    // A live branch with no conditions matches everything.
                    Ok(if filter.is_empty() {
                        "(1 = 1)".to_owned()
                    } else {
                        format!("({filter})")
                    })
                })
                .collect::<Result<_, CompileError>>()?;
            match branches.len() {
                // An all-empty disjunction should have been pruned before it
                // ever reached the compiler.
                0 => Err(CompileError::VacuousDisjunction),
                1 => Ok(branches.into_iter().join("")),
                _ => Ok(format!("({})", branches.into_iter().join(" OR "))),
            }
        }
    }
}

fn render_field_condition(
    fc: &FieldCondition,
    alias: &str,
    table: &str,
    scope: &mut Scope,
) -> Result<String, CompileError> {
    let column = format!("{alias}.{}", to_column_name(&fc.field));
    let field = fc.field.as_str();
    let negated = fc.restriction.negated;

    use RestrictionKind::*;
    Ok(match &fc.restriction.kind {
        Equals(value) => {
            let op = if negated { "<>" } else { "=" };
            let param = scope.next_param(table, field, value.clone());
            format!("{column} {op} {param}")
        }
        Greater(value) => comparison(&column, ">", "<=", negated, table, field, value, scope),
        GreaterOrEquals(value) => {
            comparison(&column, ">=", "<", negated, table, field, value, scope)
        }
        Less(value) => comparison(&column, "<", ">=", negated, table, field, value, scope),
        LessOrEquals(value) => comparison(&column, "<=", ">", negated, table, field, value, scope),
        Between(lower, upper) => {
            let lower = scope.next_param(table, field, lower.clone());
            let upper = scope.next_param(table, field, upper.clone());
            if negated {
                // Never an inverted BETWEEN: "not within range" is an
                // explicit pair of strict comparisons.
                format!("({column} < {lower} OR {column} > {upper})")
            } else {
                format!("{column} BETWEEN {lower} AND {upper}")
            }
        }
        In(values) if values.is_empty() => {
            // Only reachable through hand-built restrictions; the fluent API
            // turns an empty IN into the guaranteed-empty flag instead.
            // `IN ()` is not valid SQL, so emit the constant truth value.
            if negated { "1 = 1" } else { "1 = 0" }.to_owned()
        }
        In(values) => {
            let params = values
                .iter()
                .map(|value| scope.next_param(table, field, value.clone()))
                .join(", ");
            let op = if negated { "NOT IN" } else { "IN" };
            format!("{column} {op} ({params})")
        }
        IsNull => {
            if negated {
                format!("{column} IS NOT NULL")
            } else {
                format!("{column} IS NULL")
            }
        }
        Like(pattern) => like(&column, pattern.clone(), negated, table, field, scope),
        Contains(needle) => like(&column, format!("%{needle}%"), negated, table, field, scope),
        StartsWith(prefix) => like(&column, format!("{prefix}%"), negated, table, field, scope),
        EndsWith(suffix) => like(&column, format!("%{suffix}"), negated, table, field, scope),
        StringLengthBetween(lower, upper) => {
            let length = format!("{LENGTH_FUNCTION}({column})");
            let lower = scope.next_param(table, field, Value::Integer(*lower as i64));
            let upper = scope.next_param(table, field, Value::Integer(*upper as i64));
            if negated {
                format!("({length} < {lower} OR {length} > {upper})")
            } else {
                format!("{length} BETWEEN {lower} AND {upper}")
            }
        }
        StringLengthLess(limit) => {
            let op = if negated { ">=" } else { "<" };
            let param = scope.next_param(table, field, Value::Integer(*limit as i64));
            format!("{LENGTH_FUNCTION}({column}) {op} {param}")
        }
        Empty => {
            if negated {
                format!("({column} IS NOT NULL AND {column} <> '')")
            } else {
                format!("({column} IS NULL OR {column} = '')")
            }
        }
    })
}

#[allow(clippy::too_many_arguments)]
fn comparison(
    column: &str,
    op: &str,
    negated_op: &str,
    negated: bool,
    table: &str,
    field: &str,
    value: &Value,
    scope: &mut Scope,
) -> String {
    let op = if negated { negated_op } else { op };
    let param = scope.next_param(table, field, value.clone());
    format!("{column} {op} {param}")
}

fn like(
    column: &str,
    pattern: String,
    negated: bool,
    table: &str,
    field: &str,
    scope: &mut Scope,
) -> String {
    let op = if negated { "NOT LIKE" } else { "LIKE" };
    let param = scope.next_param(table, field, Value::Text(pattern));
    format!("{column} {op} {param}")
}

/// Assemble the WHERE clause: one item per introduced query whose conditions
/// are WHERE-tagged, in introduction order, followed by the existence
/// checks. Items are joined by `AND`; the fragment starts with `"\n\t"` and
/// is empty when there is nothing to say.
pub(crate) fn append_where_clause(
    source: &JoinQuery,
    scope: &mut Scope,
) -> Result<String, CompileError> {
    let mut items = Vec::new();

    for (query, alias) in scope.introduced_queries() {
        if !query.has_conditions() {
            continue;
        }
        let is_primary = query.is_same_instance(source.primary());
        if !is_primary && query.conditions_location() == ConditionsLocation::Join {
            continue;
        }
        items.push(build_filter(&query, &alias, scope)?);
    }

    for check in source.exists_checks() {
        // A guaranteed-empty referer can never change the result set; the
        // whole check is pruned instead of emitted.
        if check.referer.is_guaranteed_empty() {
            continue;
        }
        let referred_alias = scope
            .seen_alias(&check.referred)
            .map(str::to_owned)
            .ok_or_else(|| CompileError::MalformedJoinGraph {
                detail: format!(
                    "existence check from `{}`: referred query `{}` is not part of the join graph",
                    check.referer.table_name(),
                    check.referred.table_name(),
                ),
            })?;
        let referer_alias = scope.assign_alias(&check.referer);
        let table = check.referer.table_name();

        let mut subquery = format!("SELECT 1 FROM {table}");
        if referer_alias != table {
            subquery.push_str(&format!(" AS {referer_alias}"));
        }
        subquery.push_str(&format!(
            " WHERE {referer_alias}.{} = {referred_alias}.{PK_COLUMN}",
            to_column_name(&check.fk_field)
        ));
        if check.referer.has_conditions() {
            let filter = build_filter(&check.referer, &referer_alias, scope)?;
            subquery.push_str(" AND ");
            subquery.push_str(&filter);
        }

        let keyword = match check.kind {
            ExistsKind::Exists => "EXISTS",
            ExistsKind::NotExists => "NOT EXISTS",
        };
        items.push(format!("{keyword} ({subquery})"));
    }

    if items.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("\n\t{}", items.join("\n\tAND ")))
}
