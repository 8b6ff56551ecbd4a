mod overrides;

pub use overrides::{Passthrough, ValueOverride};
