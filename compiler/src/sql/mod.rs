mod data;
mod dialect;
mod mysql;
mod postgres;

pub use data::{ColumnsSelection, QueryData, SelectedColumn};
pub use dialect::{Dialect, ParamSink};
pub use mysql::MySql;
pub use postgres::Postgres;
