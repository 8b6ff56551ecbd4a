use indexmap::IndexMap;

use quell_model::{NullsSort, OrderBy, Pager, SortDirection, Value};

use super::data::QueryData;
use super::dialect::{Dialect, ParamSink};
use crate::builder::constants::{MAX_PARAM, OFFSET_PARAM};
use crate::errors::CompileError;

/// Postgres-family dialect. Counting runs a `COUNT(*)` over the same
/// FROM/WHERE as a second query; collation and nulls placement are appended
/// after the direction keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Postgres();

impl Dialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn supports_nulls_ordering(&self) -> bool {
        true
    }

    fn requires_projected_order_columns(&self) -> bool {
        true
    }

    fn render_order_entry(&self, expr: &str, entry: &OrderBy) -> Result<String, CompileError> {
        let direction = match entry.direction {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        };
        let mut rendered = format!("{expr} {direction}");
        if let Some(collation) = &entry.collation {
            rendered.push_str(&format!(" COLLATE \"{collation}\""));
        }
        match entry.nulls {
            Some(NullsSort::First) => rendered.push_str(" NULLS FIRST"),
            Some(NullsSort::Last) => rendered.push_str(" NULLS LAST"),
            None => {}
        }
        Ok(rendered)
    }

    fn limit_clause(&self, pager: &Pager, params: &mut dyn ParamSink) -> String {
        params.bind(MAX_PARAM, Value::Integer(pager.max as i64));
        params.bind(OFFSET_PARAM, Value::Integer(pager.offset as i64));
        format!("\nLIMIT :{MAX_PARAM} OFFSET :{OFFSET_PARAM}")
    }

    fn count_data(
        &self,
        distinct_pk: Option<&str>,
        from: &str,
        where_clause: &str,
        params: IndexMap<String, Value>,
    ) -> QueryData {
        let target = match distinct_pk {
            Some(pk) => format!("DISTINCT {pk}"),
            None => "*".to_owned(),
        };
        let mut sql = format!("SELECT COUNT({target})\nFROM{from}");
        if !where_clause.is_empty() {
            sql.push_str("\nWHERE");
            sql.push_str(where_clause);
        }
        QueryData {
            sql,
            params,
            selected_columns: Vec::new(),
        }
    }
}
