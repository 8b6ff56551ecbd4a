use thiserror::Error;

/// Failures raised while compiling a query model. All of these are
/// programmer or configuration errors surfaced at compile time; none is a
/// recoverable runtime condition, and an error never comes with partial SQL.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// A restriction kind has no SQL mapping in the active dialect. The
    /// restriction union is closed and fully matched, so the fluent API can
    /// never trigger this; it guards future dialect-specific gaps.
    #[error("restriction `{restriction}` has no SQL mapping in dialect `{dialect}`")]
    UnsupportedRestriction {
        restriction: String,
        dialect: String,
    },

    /// A join element referenced queries of which either both or neither
    /// were already part of the join graph.
    #[error("malformed join graph: {detail}")]
    MalformedJoinGraph { detail: String },

    /// Every branch of a disjunction was pruned as guaranteed-empty. Such a
    /// disjunction should have been pruned one level up and must never reach
    /// the compiler.
    #[error("every branch of a disjunction was pruned as guaranteed-empty")]
    VacuousDisjunction,

    /// The primary query can never match any row. The caller is expected to
    /// consult `Query::is_guaranteed_empty` and skip compilation entirely
    /// instead of asking for always-false SQL.
    #[error("a guaranteed-empty query reached the compiler; prune it before compiling")]
    GuaranteedEmptyQuery,

    /// The query asked for something the active dialect cannot express, e.g.
    /// `NULLS FIRST/LAST` on the MySQL family.
    #[error("`{feature}` is not supported by dialect `{dialect}`")]
    UnsupportedFeature { feature: String, dialect: String },

    /// An ORDER BY entry referenced a query that is not part of the compiled
    /// join graph.
    #[error("ORDER BY references field `{field}` of a query that is not part of the join graph")]
    UnknownOrderByQuery { field: String },
}
