use thiserror::Error;

/// Errors raised while parsing, compiling, or executing a pattern.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("pattern parse error at byte {offset}: {description}")]
    Parse { offset: usize, description: String },
    #[error("pattern compile error: {0}")]
    Compile(String),
    #[error("pattern VM exceeded its instruction limit")]
    VmLimitExceeded,
}

pub type Result<T> = std::result::Result<T, Error>;
