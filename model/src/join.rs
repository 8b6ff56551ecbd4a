use crate::error::QueryBuildError;
use crate::query::Query;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistsKind {
    Exists,
    NotExists,
}

/// One edge of the join graph. The referer holds the foreign key; the
/// generated predicate equates the referer's FK column with the referred
/// query's primary-key column.
#[derive(Debug, Clone)]
pub struct JoinElement {
    pub referer: Query,
    pub referred: Query,
    pub kind: JoinKind,
    pub fk_field: String,
}

/// A semi-join (`EXISTS`) or anti-join (`NOT EXISTS`) correlated on the
/// referer's FK column against an already-joined query.
#[derive(Debug, Clone)]
pub struct ExistsElement {
    pub kind: ExistsKind,
    pub referer: Query,
    pub referred: Query,
    pub fk_field: String,
}

/// A primary query plus an ordered list of join edges and existence checks.
/// Every query referenced by an edge must be the primary query or have been
/// introduced by an earlier edge; the compiler rejects anything else.
#[derive(Debug, Clone)]
pub struct JoinQuery {
    primary: Query,
    joins: Vec<JoinElement>,
    exists_checks: Vec<ExistsElement>,
    dedup: bool,
}

impl JoinQuery {
    pub fn new(primary: Query) -> Self {
        Self {
            primary,
            joins: Vec::new(),
            exists_checks: Vec::new(),
            dedup: false,
        }
    }

    fn push_join(mut self, referer: &Query, referred: &Query, kind: JoinKind, fk: &str) -> Self {
        self.joins.push(JoinElement {
            referer: referer.clone(),
            referred: referred.clone(),
            kind,
            fk_field: fk.to_owned(),
        });
        self
    }

    /// Inner-join `referer` to `referred` on `referer.<fkField> = referred.id`.
    pub fn join(self, referer: &Query, referred: &Query, fk_field: &str) -> Self {
        self.push_join(referer, referred, JoinKind::Inner, fk_field)
    }

    pub fn left_join(self, referer: &Query, referred: &Query, fk_field: &str) -> Self {
        self.push_join(referer, referred, JoinKind::Left, fk_field)
    }

    fn push_exists(
        mut self,
        kind: ExistsKind,
        referer: JoinQuery,
        referred: &Query,
        fk_field: &str,
    ) -> Result<Self, QueryBuildError> {
        if !referer.joins.is_empty() || !referer.exists_checks.is_empty() {
            return Err(QueryBuildError::ExistenceCheckWithJoins);
        }
        self.exists_checks.push(ExistsElement {
            kind,
            referer: referer.primary,
            referred: referred.clone(),
            fk_field: fk_field.to_owned(),
        });
        Ok(self)
    }

    /// Keep rows of `referred` for which a matching `referer` row exists.
    /// The referer side must be a single table; a join query carrying joins
    /// or existence checks of its own is rejected here, before compilation.
    pub fn exists(
        self,
        referer: impl Into<JoinQuery>,
        referred: &Query,
        fk_field: &str,
    ) -> Result<Self, QueryBuildError> {
        self.push_exists(ExistsKind::Exists, referer.into(), referred, fk_field)
    }

    /// Keep rows of `referred` for which no matching `referer` row exists.
    pub fn not_exists(
        self,
        referer: impl Into<JoinQuery>,
        referred: &Query,
        fk_field: &str,
    ) -> Result<Self, QueryBuildError> {
        self.push_exists(ExistsKind::NotExists, referer.into(), referred, fk_field)
    }

    /// Collapse the cartesian product introduced by backward joins: the
    /// compiler wraps the query in a `ROW_NUMBER()` window filtered to rank 1
    /// per primary row.
    pub fn dedup(mut self) -> Self {
        self.dedup = true;
        self
    }

    pub fn primary(&self) -> &Query {
        &self.primary
    }

    pub fn joins(&self) -> &[JoinElement] {
        &self.joins
    }

    pub fn exists_checks(&self) -> &[ExistsElement] {
        &self.exists_checks
    }

    pub fn is_dedup(&self) -> bool {
        self.dedup
    }
}

impl From<Query> for JoinQuery {
    fn from(primary: Query) -> Self {
        JoinQuery::new(primary)
    }
}
