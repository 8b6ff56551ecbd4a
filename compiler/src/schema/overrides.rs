use quell_model::Value;

/// Hook consulted on every parameter binding. Lets the surrounding
/// application map domain values to their SQL representation (an enum stored
/// as text, a wrapped identifier stored as an integer) without the compiler
/// knowing about those types.
pub trait ValueOverride {
    fn rewrite(&self, table: &str, field: &str, value: Value) -> Value;
}

/// Default hook: every value binds as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl ValueOverride for Passthrough {
    fn rewrite(&self, _table: &str, _field: &str, value: Value) -> Value {
        value
    }
}
