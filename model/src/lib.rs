mod condition;
mod error;
mod join;
mod order;
mod query;
mod record;
mod restriction;
mod value;

pub use condition::{Condition, DisjunctionCondition, FieldCondition};
pub use error::QueryBuildError;
pub use join::{ExistsElement, ExistsKind, JoinElement, JoinKind, JoinQuery};
pub use order::{NullsSort, OrderBy, Pager, SortDirection};
pub use query::{ConditionsLocation, Query, QueryBuilder, QueryId};
pub use record::{fields_of, Record};
pub use restriction::{Restriction, RestrictionKind};
pub use value::Value;
