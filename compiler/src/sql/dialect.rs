use indexmap::IndexMap;

use quell_model::{OrderBy, Pager, Value};

use super::data::QueryData;
use crate::errors::CompileError;

/// Receives the named parameter bindings a dialect produces while rendering
/// its pagination clause.
pub trait ParamSink {
    fn bind(&mut self, name: &str, value: Value);
}

/// The dialect-specific leaves of the compiler. Restriction and join-graph
/// compilation are shared across dialects; only order-by rendering, the
/// column-projection rules and the pagination/counting strategy differ.
pub trait Dialect {
    /// Dialect name used in error messages.
    fn name(&self) -> &'static str;

    /// Whether `ORDER BY ... NULLS FIRST/LAST` can be rendered. A dialect
    /// that cannot must reject the request loudly instead of dropping it.
    fn supports_nulls_ordering(&self) -> bool;

    /// Whether a column of a non-primary query referenced by ORDER BY must
    /// be appended to the SELECT list for the reference to be legal.
    fn requires_projected_order_columns(&self) -> bool;

    /// Render one ORDER BY entry. `expr` is the already-resolved column
    /// reference: either a projection label or `alias.column`.
    fn render_order_entry(&self, expr: &str, entry: &OrderBy) -> Result<String, CompileError>;

    /// Text inserted directly after `SELECT ` when the query is paged.
    fn paged_select_prefix(&self) -> &'static str {
        ""
    }

    /// Render the pagination clause, binding its named parameters.
    fn limit_clause(&self, pager: &Pager, params: &mut dyn ParamSink) -> String;

    /// Build the companion row-count query. `from` and `where_clause` are
    /// the fragments of the just-compiled query; `distinct_pk` is the
    /// primary key reference to count distinct when deduplication collapsed
    /// a backward-join fan-out.
    fn count_data(
        &self,
        distinct_pk: Option<&str>,
        from: &str,
        where_clause: &str,
        params: IndexMap<String, Value>,
    ) -> QueryData;
}
