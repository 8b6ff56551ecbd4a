use indexmap::IndexMap;

use quell_model::{OrderBy, Pager, SortDirection, Value};

use super::data::QueryData;
use super::dialect::{Dialect, ParamSink};
use crate::builder::constants::{MAX_PARAM, OFFSET_PARAM};
use crate::errors::CompileError;

/// MySQL-family dialect. Pagination rides on `SQL_CALC_FOUND_ROWS` with a
/// `SELECT FOUND_ROWS()` follow-up, so the count query needs no recompilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MySql();

impl Dialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn supports_nulls_ordering(&self) -> bool {
        false
    }

    fn requires_projected_order_columns(&self) -> bool {
        false
    }

    fn render_order_entry(&self, expr: &str, entry: &OrderBy) -> Result<String, CompileError> {
        if entry.nulls.is_some() {
            return Err(CompileError::UnsupportedFeature {
                feature: "ORDER BY ... NULLS FIRST/LAST".to_owned(),
                dialect: self.name().to_owned(),
            });
        }
        let direction = match entry.direction {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        };
        Ok(match &entry.collation {
            Some(collation) => format!("{expr} COLLATE {collation} {direction}"),
            None => format!("{expr} {direction}"),
        })
    }

    fn paged_select_prefix(&self) -> &'static str {
        "SQL_CALC_FOUND_ROWS "
    }

    fn limit_clause(&self, pager: &Pager, params: &mut dyn ParamSink) -> String {
        params.bind(OFFSET_PARAM, Value::Integer(pager.offset as i64));
        params.bind(MAX_PARAM, Value::Integer(pager.max as i64));
        format!("\nLIMIT :{OFFSET_PARAM},:{MAX_PARAM}")
    }

    fn count_data(
        &self,
        _distinct_pk: Option<&str>,
        _from: &str,
        _where_clause: &str,
        _params: IndexMap<String, Value>,
    ) -> QueryData {
        QueryData {
            sql: "SELECT FOUND_ROWS()".to_owned(),
            params: IndexMap::new(),
            selected_columns: Vec::new(),
        }
    }
}
