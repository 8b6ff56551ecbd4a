mod builder;
mod errors;
mod schema;
mod sql;
mod utils;

#[cfg(test)]
mod tests;

pub use builder::SqlBuilder;
pub use errors::CompileError;
pub use schema::{Passthrough, ValueOverride};
pub use sql::{ColumnsSelection, Dialect, MySql, ParamSink, Postgres, QueryData, SelectedColumn};
pub use utils::to_column_name;
