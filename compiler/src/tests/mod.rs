mod support;

mod dedup;
mod from_clause;
mod where_clause;
