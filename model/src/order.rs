use crate::query::Query;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullsSort {
    First,
    Last,
}

/// An ordering specification against one field of one query in the join
/// graph. Collation and nulls placement are dialect-checked at compile time.
#[derive(Debug, Clone)]
pub struct OrderBy {
    pub query: Query,
    pub field: String,
    pub direction: SortDirection,
    pub nulls: Option<NullsSort>,
    pub collation: Option<String>,
}

impl OrderBy {
    pub fn asc(query: &Query, field: impl Into<String>) -> Self {
        Self::new(query, field, SortDirection::Asc)
    }

    pub fn desc(query: &Query, field: impl Into<String>) -> Self {
        Self::new(query, field, SortDirection::Desc)
    }

    fn new(query: &Query, field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            query: query.clone(),
            field: field.into(),
            direction,
            nulls: None,
            collation: None,
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = Some(NullsSort::First);
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = Some(NullsSort::Last);
        self
    }

    pub fn collate(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }
}

/// Offset/limit pagination parameters. How they are rendered (and how the
/// total row count is obtained) is a dialect concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub offset: u64,
    pub max: u64,
}

impl Pager {
    pub fn new(offset: u64, max: u64) -> Self {
        Self { offset, max }
    }
}
