use crate::query::Query;
use crate::restriction::Restriction;

/// One entry in a query's condition list. Entries are combined with an
/// implicit AND.
#[derive(Debug, Clone)]
pub enum Condition {
    Field(FieldCondition),
    Disjunction(DisjunctionCondition),
}

/// A restriction applied to one logical field. The field name is a
/// camelCase-style property name; it becomes a physical column name only at
/// compile time.
#[derive(Debug, Clone)]
pub struct FieldCondition {
    pub field: String,
    pub restriction: Restriction,
}

impl FieldCondition {
    pub fn new(field: impl Into<String>, restriction: impl Into<Restriction>) -> Self {
        Self {
            field: field.into(),
            restriction: restriction.into(),
        }
    }
}

/// An OR over sub-queries. Branches flagged guaranteed-empty are pruned at
/// compile time; the compiler rejects a disjunction whose every branch was
/// pruned.
#[derive(Debug, Clone)]
pub struct DisjunctionCondition {
    pub branches: Vec<Query>,
}

impl DisjunctionCondition {
    pub fn new(branches: Vec<Query>) -> Self {
        debug_assert!(!branches.is_empty(), "a disjunction needs branches");
        Self { branches }
    }

    /// Branches that survive guaranteed-empty pruning.
    pub fn live_branches(&self) -> impl Iterator<Item = &Query> {
        self.branches.iter().filter(|b| !b.is_guaranteed_empty())
    }
}
