/// The primary-key column every join and existence predicate equates the
/// foreign key against.
pub const PK_COLUMN: &str = "id";

/// Prefix for generated parameter names: `arg0`, `arg1`, ...
pub const PARAM_PREFIX: &str = "arg";

/// Named pagination parameters.
pub const OFFSET_PARAM: &str = "offset";
pub const MAX_PARAM: &str = "max";

/// Alias of the derived table wrapping a deduplicated query, and the name of
/// its rank column.
pub const DEDUP_ALIAS: &str = "dedup";
pub const DEDUP_RANK_COLUMN: &str = "row_num";

/// String length function shared by both dialect families.
pub const LENGTH_FUNCTION: &str = "CHAR_LENGTH";
