mod error;

pub use error::CompileError;
