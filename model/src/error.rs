use thiserror::Error;

/// Rejections raised while building a query model, before any compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryBuildError {
    /// An existence check was given more than one table on its referer side.
    #[error("an EXISTS/NOT EXISTS referer must be a single table without joins")]
    ExistenceCheckWithJoins,
}
