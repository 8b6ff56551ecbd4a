use indexmap::IndexMap;
use serde::Serialize;

use quell_model::Value;

/// One explicitly enumerated column: the logical field it came from, the
/// physical column, and the label it was projected under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedColumn {
    pub field_name: String,
    pub column_name: String,
    pub column_label: String,
}

/// What the SELECT list contains for one query of the join graph: either a
/// wildcard over its alias or an explicit column enumeration. Kept so ORDER
/// BY references (and later row-to-field mapping) can be resolved without
/// re-deriving column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnsSelection {
    pub alias: String,
    pub wildcard: bool,
    pub columns: Vec<SelectedColumn>,
}

impl ColumnsSelection {
    pub fn wildcard(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            wildcard: true,
            columns: Vec::new(),
        }
    }

    pub fn explicit(alias: impl Into<String>, columns: Vec<SelectedColumn>) -> Self {
        Self {
            alias: alias.into(),
            wildcard: false,
            columns,
        }
    }

    /// The projection label of a physical column, when it was explicitly
    /// enumerated here.
    pub fn label_of(&self, column_name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.column_name == column_name)
            .map(|c| c.column_label.as_str())
    }
}

/// The compiler's immutable output: parameterized SQL text, the named values
/// to bind, and the record of what was selected. Owned solely by the caller
/// that requested the compilation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryData {
    pub sql: String,
    pub params: IndexMap<String, Value>,
    pub selected_columns: Vec<ColumnsSelection>,
}
