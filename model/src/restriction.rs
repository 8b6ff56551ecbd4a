use crate::value::Value;

/// The closed set of predicate kinds a field condition can carry. Adding a
/// variant here forces every dialect compiler to handle it via exhaustive
/// matching.
#[derive(Debug, Clone, PartialEq)]
pub enum RestrictionKind {
    Equals(Value),
    Greater(Value),
    GreaterOrEquals(Value),
    Less(Value),
    LessOrEquals(Value),
    Between(Value, Value),
    In(Vec<Value>),
    IsNull,
    /// Raw LIKE pattern, passed through as the parameter value.
    Like(String),
    /// Substring match; the compiler binds `%value%`.
    Contains(String),
    StartsWith(String),
    EndsWith(String),
    StringLengthBetween(u64, u64),
    StringLengthLess(u64),
    /// String column is NULL or the empty string.
    Empty,
}

/// A predicate with an orthogonal negation bit. A negated `Between` means
/// "not within the range", never "within the inverted range".
#[derive(Debug, Clone, PartialEq)]
pub struct Restriction {
    pub kind: RestrictionKind,
    pub negated: bool,
}

impl Restriction {
    pub fn new(kind: RestrictionKind) -> Self {
        Self {
            kind,
            negated: false,
        }
    }

    /// Flip the negation bit. Self-inverse: `r.negate().negate() == r`.
    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// True when this restriction can never match anything: a positive `IN`
    /// over an empty collection. This is the one narrow static heuristic the
    /// model performs; there is deliberately no general constant folding.
    pub fn is_guaranteed_empty(&self) -> bool {
        matches!(&self.kind, RestrictionKind::In(values) if values.is_empty() && !self.negated)
    }

    /// True when this restriction matches everything: a negated `IN` over an
    /// empty collection. Such a condition is dropped rather than recorded.
    pub fn is_vacuously_true(&self) -> bool {
        matches!(&self.kind, RestrictionKind::In(values) if values.is_empty() && self.negated)
    }
}

impl From<RestrictionKind> for Restriction {
    fn from(kind: RestrictionKind) -> Self {
        Restriction::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negate_is_self_inverse() {
        let r = Restriction::new(RestrictionKind::Equals(Value::Integer(1)));
        assert_eq!(r.clone().negate().negate(), r);
    }

    #[test]
    fn empty_in_is_guaranteed_empty() {
        let r = Restriction::new(RestrictionKind::In(vec![]));
        assert!(r.is_guaranteed_empty());
        assert!(!r.is_vacuously_true());
        let negated = r.negate();
        assert!(!negated.is_guaranteed_empty());
        assert!(negated.is_vacuously_true());
    }

    #[test]
    fn populated_in_is_neither() {
        let r = Restriction::new(RestrictionKind::In(vec![Value::Integer(1)]));
        assert!(!r.is_guaranteed_empty());
        assert!(!r.clone().negate().is_vacuously_true());
    }
}
