mod builder;
mod columns;
pub(crate) mod constants;
mod filters;
mod from_clause;
mod ordering;
mod scope;

pub use builder::SqlBuilder;
