use quell_model::{ConditionsLocation, JoinElement, JoinKind, JoinQuery};

use super::constants::PK_COLUMN;
use super::filters::build_filter;
use super::scope::Scope;
use crate::errors::CompileError;
use crate::utils::to_column_name;

/// The compiled FROM clause plus what the rest of the compilation needs to
/// know about it.
pub(crate) struct FromParts {
    /// Fragment appended directly after the `FROM` keyword; starts with
    /// `"\n\t"`.
    pub fragment: String,
    pub primary_alias: String,
    /// `alias.id` references of the backward-joined (one-to-many) queries,
    /// in join order. These feed the dedup window ordering.
    pub backward_pk_refs: Vec<String>,
}

/// Turn the join graph into a FROM/JOIN fragment, assigning aliases and
/// resolving join direction. Each element must have exactly one side already
/// introduced; anything else is a malformed graph.
pub(crate) fn append_from_clause(
    source: &JoinQuery,
    scope: &mut Scope,
) -> Result<FromParts, CompileError> {
    let primary = source.primary();
    let primary_alias = scope.introduce(primary);
    let mut fragment = format!("\n\t{}", primary.table_name());
    if primary_alias != primary.table_name() {
        fragment.push_str(&format!(" AS {primary_alias}"));
    }

    let mut backward_pk_refs = Vec::new();
    for element in source.joins() {
        let referer_alias = scope.seen_alias(&element.referer).map(str::to_owned);
        let referred_alias = scope.seen_alias(&element.referred).map(str::to_owned);
        let (new_query, referer_alias, referred_alias, backward) =
            match (referer_alias, referred_alias) {
                (Some(_), Some(_)) => {
                    return Err(malformed(element, "both sides are already part of the query"));
                }
                (None, None) => {
                    return Err(malformed(element, "neither side is part of the query yet"));
                }
                // Forward join: the referred side is new; the FK points out
                // of an already-joined table.
                (Some(referer_alias), None) => {
                    let new_alias = scope.introduce(&element.referred);
                    (&element.referred, referer_alias, new_alias, false)
                }
                // Backward join: the referer side is new; the FK points back
                // at an already-joined table. One-to-many, so it can fan out.
                (None, Some(referred_alias)) => {
                    let new_alias = scope.introduce(&element.referer);
                    (&element.referer, new_alias, referred_alias, true)
                }
            };

        let keyword = match element.kind {
            JoinKind::Inner => "JOIN",
            JoinKind::Left => "LEFT JOIN",
        };
        let new_alias = if backward {
            referer_alias.clone()
        } else {
            referred_alias.clone()
        };
        fragment.push_str(&format!("\n\t{keyword} {}", new_query.table_name()));
        if new_alias != new_query.table_name() {
            fragment.push_str(&format!(" AS {new_alias}"));
        }
        fragment.push_str(&format!(
            " ON {referer_alias}.{} = {referred_alias}.{PK_COLUMN}",
            to_column_name(&element.fk_field)
        ));

        // A newly introduced query whose conditions belong in the join gets
        // them ANDed into the ON clause, so a LEFT JOIN keeps its outer rows.
        if new_query.has_conditions()
            && new_query.conditions_location() == ConditionsLocation::Join
        {
            let filter = build_filter(new_query, &new_alias, scope)?;
            fragment.push_str(" AND ");
            fragment.push_str(&filter);
        }

        if backward {
            backward_pk_refs.push(format!("{new_alias}.{PK_COLUMN}"));
        }
    }

    Ok(FromParts {
        fragment,
        primary_alias,
        backward_pk_refs,
    })
}

fn malformed(element: &JoinElement, reason: &str) -> CompileError {
    CompileError::MalformedJoinGraph {
        detail: format!(
            "join of `{}` to `{}` on `{}`: {reason}",
            element.referer.table_name(),
            element.referred.table_name(),
            element.fk_field,
        ),
    }
}
