use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::condition::{Condition, DisjunctionCondition, FieldCondition};
use crate::record::{fields_of, Record};
use crate::restriction::{Restriction, RestrictionKind};
use crate::value::Value;

/// Where a query's own field conditions land in the generated SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConditionsLocation {
    /// ANDed into the WHERE clause (the default).
    #[default]
    Where,
    /// ANDed into the ON clause of the join that introduces the query. Keeps
    /// per-branch filtering on a LEFT JOIN from turning it into an inner join.
    Join,
}

/// Per-instance identity. Two queries built independently over the same row
/// type are distinct table instances; this is what makes self-joins possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryId(u64);

fn next_query_id() -> QueryId {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    QueryId(COUNTER.fetch_add(1, Ordering::Relaxed))
}

#[derive(Debug)]
struct QueryInner {
    id: QueryId,
    table: String,
    fields: Arc<[String]>,
    alias: Option<String>,
    conditions: Vec<Condition>,
    guaranteed_empty: bool,
    conditions_location: ConditionsLocation,
}

/// An immutable single-table query: an ordered condition list (implicit AND),
/// an optional alias, and a conservative guaranteed-empty flag. Cheap to
/// clone; clones share identity.
#[derive(Debug, Clone)]
pub struct Query(Arc<QueryInner>);

impl Query {
    /// Start building a query over the given row type.
    pub fn of<R: Record>() -> QueryBuilder {
        QueryBuilder {
            table: R::table_name().to_owned(),
            fields: fields_of::<R>(),
            alias: None,
            conditions: Vec::new(),
            guaranteed_empty: false,
            conditions_location: ConditionsLocation::default(),
        }
    }

    pub fn id(&self) -> QueryId {
        self.0.id
    }

    /// Physical table name, as registered by the row type.
    pub fn table_name(&self) -> &str {
        &self.0.table
    }

    /// Ordered logical field names of the row type.
    pub fn fields(&self) -> &[String] {
        &self.0.fields
    }

    pub fn alias(&self) -> Option<&str> {
        self.0.alias.as_deref()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.0.conditions
    }

    pub fn has_conditions(&self) -> bool {
        !self.0.conditions.is_empty()
    }

    /// Conservative static flag: true when some restriction on this query can
    /// never match (currently only `is_in` with an empty collection).
    pub fn is_guaranteed_empty(&self) -> bool {
        self.0.guaranteed_empty
    }

    pub fn conditions_location(&self) -> ConditionsLocation {
        self.0.conditions_location
    }

    /// True when `other` is the same table instance (not merely the same
    /// table).
    pub fn is_same_instance(&self, other: &Query) -> bool {
        self.0.id == other.0.id
    }
}

/// Fluent, single-owner builder for [`Query`]. Never shared across threads;
/// the built query is immutable.
#[derive(Debug)]
pub struct QueryBuilder {
    table: String,
    fields: Arc<[String]>,
    alias: Option<String>,
    conditions: Vec<Condition>,
    guaranteed_empty: bool,
    conditions_location: ConditionsLocation,
}

impl QueryBuilder {
    pub fn build(self) -> Query {
        Query(Arc::new(QueryInner {
            id: next_query_id(),
            table: self.table,
            fields: self.fields,
            alias: self.alias,
            conditions: self.conditions,
            guaranteed_empty: self.guaranteed_empty,
            conditions_location: self.conditions_location,
        }))
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Place this query's conditions in the ON clause of the join that
    /// introduces it, instead of the WHERE clause.
    pub fn conditions_in_join(mut self) -> Self {
        self.conditions_location = ConditionsLocation::Join;
        self
    }

    /// Append an arbitrary restriction on a field.
    pub fn restrict(mut self, field: impl Into<String>, restriction: Restriction) -> Self {
        if restriction.is_vacuously_true() {
            return self;
        }
        if restriction.is_guaranteed_empty() {
            self.guaranteed_empty = true;
            return self;
        }
        self.conditions
            .push(Condition::Field(FieldCondition::new(field, restriction)));
        self
    }

    /// Append an OR over the given branch queries.
    pub fn or(mut self, branches: Vec<Query>) -> Self {
        self.conditions
            .push(Condition::Disjunction(DisjunctionCondition::new(branches)));
        self
    }

    pub fn eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.restrict(field, RestrictionKind::Equals(value.into()).into())
    }

    pub fn ne(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.restrict(
            field,
            Restriction::new(RestrictionKind::Equals(value.into())).negate(),
        )
    }

    pub fn gt(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.restrict(field, RestrictionKind::Greater(value.into()).into())
    }

    pub fn gte(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.restrict(field, RestrictionKind::GreaterOrEquals(value.into()).into())
    }

    pub fn lt(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.restrict(field, RestrictionKind::Less(value.into()).into())
    }

    pub fn lte(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.restrict(field, RestrictionKind::LessOrEquals(value.into()).into())
    }

    pub fn between(
        self,
        field: impl Into<String>,
        lower: impl Into<Value>,
        upper: impl Into<Value>,
    ) -> Self {
        self.restrict(
            field,
            RestrictionKind::Between(lower.into(), upper.into()).into(),
        )
    }

    pub fn not_between(
        self,
        field: impl Into<String>,
        lower: impl Into<Value>,
        upper: impl Into<Value>,
    ) -> Self {
        self.restrict(
            field,
            Restriction::new(RestrictionKind::Between(lower.into(), upper.into())).negate(),
        )
    }

    pub fn is_in<V: Into<Value>>(
        self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.restrict(field, RestrictionKind::In(values).into())
    }

    pub fn not_in<V: Into<Value>>(
        self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.restrict(field, Restriction::new(RestrictionKind::In(values)).negate())
    }

    pub fn is_null(self, field: impl Into<String>) -> Self {
        self.restrict(field, RestrictionKind::IsNull.into())
    }

    pub fn is_not_null(self, field: impl Into<String>) -> Self {
        self.restrict(field, Restriction::new(RestrictionKind::IsNull).negate())
    }

    pub fn like(self, field: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.restrict(field, RestrictionKind::Like(pattern.into()).into())
    }

    pub fn not_like(self, field: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.restrict(
            field,
            Restriction::new(RestrictionKind::Like(pattern.into())).negate(),
        )
    }

    pub fn contains(self, field: impl Into<String>, needle: impl Into<String>) -> Self {
        self.restrict(field, RestrictionKind::Contains(needle.into()).into())
    }

    pub fn starts_with(self, field: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.restrict(field, RestrictionKind::StartsWith(prefix.into()).into())
    }

    pub fn ends_with(self, field: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.restrict(field, RestrictionKind::EndsWith(suffix.into()).into())
    }

    pub fn length_between(self, field: impl Into<String>, lower: u64, upper: u64) -> Self {
        self.restrict(
            field,
            RestrictionKind::StringLengthBetween(lower, upper).into(),
        )
    }

    pub fn length_less(self, field: impl Into<String>, limit: u64) -> Self {
        self.restrict(field, RestrictionKind::StringLengthLess(limit).into())
    }

    pub fn empty(self, field: impl Into<String>) -> Self {
        self.restrict(field, RestrictionKind::Empty.into())
    }

    pub fn not_empty(self, field: impl Into<String>) -> Self {
        self.restrict(field, Restriction::new(RestrictionKind::Empty).negate())
    }
}
