use itertools::Itertools;

use quell_model::{JoinQuery, OrderBy, Pager};

use super::columns::build_select_list;
use super::constants::{DEDUP_ALIAS, DEDUP_RANK_COLUMN, PK_COLUMN};
use super::filters::append_where_clause;
use super::from_clause::append_from_clause;
use super::ordering::build_order_clause;
use super::scope::Scope;
use crate::errors::CompileError;
use crate::schema::{Passthrough, ValueOverride};
use crate::sql::{Dialect, QueryData};

/// Compiles a join graph into parameterized SQL for one dialect. A builder
/// is stateless across compilations; every `compile` call gets a fresh
/// parameter counter and alias ledger, so the same input always produces the
/// same output.
pub struct SqlBuilder {
    dialect: Box<dyn Dialect>,
    overrides: Box<dyn ValueOverride>,
}

impl SqlBuilder {
    pub fn new(dialect: impl Dialect + 'static) -> Self {
        Self {
            dialect: Box::new(dialect),
            overrides: Box::new(Passthrough),
        }
    }

    /// Replace the value-override hook applied to every bound parameter.
    pub fn with_overrides(mut self, overrides: impl ValueOverride + 'static) -> Self {
        self.overrides = Box::new(overrides);
        self
    }

    /// Compile a full SELECT. Pagination and ordering are per-call concerns,
    /// not part of the join graph.
    pub fn compile(
        &self,
        source: &JoinQuery,
        pager: Option<&Pager>,
        order_by: &[OrderBy],
    ) -> Result<QueryData, CompileError> {
        if source.primary().is_guaranteed_empty() {
            return Err(CompileError::GuaranteedEmptyQuery);
        }

        let mut scope = Scope::new(self.overrides.as_ref(), source);
        let from = append_from_clause(source, &mut scope)?;
        let where_clause = append_where_clause(source, &mut scope)?;
        let select_list = build_select_list(
            source,
            &from.primary_alias,
            order_by,
            self.dialect.as_ref(),
            &mut scope,
        )?;
        let order_clause = build_order_clause(order_by, self.dialect.as_ref(), &scope)?;

        let prefix = if pager.is_some() {
            self.dialect.paged_select_prefix()
        } else {
            ""
        };

        // Deduplication only changes anything when a backward join can fan
        // the primary rows out; without one it compiles as a plain SELECT.
        let dedup = source.is_dedup() && !from.backward_pk_refs.is_empty();
        let mut sql = if dedup {
            let rank = format!(
                ", ROW_NUMBER() OVER (PARTITION BY {}.{PK_COLUMN} ORDER BY {}) AS {DEDUP_RANK_COLUMN}",
                from.primary_alias,
                from.backward_pk_refs.iter().join(", "),
            );
            let mut inner = format!("SELECT {select_list}{rank}\nFROM{}", from.fragment);
            if !where_clause.is_empty() {
                inner.push_str("\nWHERE");
                inner.push_str(&where_clause);
            }
            inner.push_str(&order_clause);
            format!(
                "SELECT {prefix}* FROM ({inner}) AS {DEDUP_ALIAS}\nWHERE {DEDUP_ALIAS}.{DEDUP_RANK_COLUMN} = 1"
            )
        } else {
            let mut sql = format!("SELECT {prefix}{select_list}\nFROM{}", from.fragment);
            if !where_clause.is_empty() {
                sql.push_str("\nWHERE");
                sql.push_str(&where_clause);
            }
            sql.push_str(&order_clause);
            sql
        };

        if let Some(pager) = pager {
            sql.push_str(&self.dialect.limit_clause(pager, &mut scope));
        }

        let (params, selected_columns) = scope.into_output();
        Ok(QueryData {
            sql,
            params,
            selected_columns,
        })
    }

    /// Build the companion row-count query for the same join graph. For
    /// dialects that count by recompiling, a deduplicated fan-out collapses
    /// to a `COUNT(DISTINCT primary.id)`.
    pub fn compile_count(&self, source: &JoinQuery) -> Result<QueryData, CompileError> {
        if source.primary().is_guaranteed_empty() {
            return Err(CompileError::GuaranteedEmptyQuery);
        }

        let mut scope = Scope::new(self.overrides.as_ref(), source);
        let from = append_from_clause(source, &mut scope)?;
        let where_clause = append_where_clause(source, &mut scope)?;

        let distinct_pk = if source.is_dedup() && !from.backward_pk_refs.is_empty() {
            Some(format!("{}.{PK_COLUMN}", from.primary_alias))
        } else {
            None
        };
        let (params, _) = scope.into_output();
        Ok(self.dialect.count_data(
            distinct_pk.as_deref(),
            &from.fragment,
            &where_clause,
            params,
        ))
    }
}
