use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building an index or answering a query.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("corpus contains no documents")]
    EmptyCorpus,
    #[error("corpus of {0} documents exceeds the document id space")]
    CorpusTooLarge(usize),
    #[error("top_k must be a positive integer")]
    InvalidTopK,
    #[error("invalid scoring parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("unknown scoring strategy '{0}' (expected bm25, tfidf or cosine)")]
    UnknownStrategy(String),
    #[error("scoring failed: {0}")]
    Computation(String),
    #[error("operation cancelled")]
    Cancelled,
}

/// Coarse classification of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input to construction or search; retrying with the same input fails again.
    Configuration,
    Computation,
    Cancelled,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyCorpus
            | Error::CorpusTooLarge(_)
            | Error::InvalidTopK
            | Error::InvalidParameter { .. }
            | Error::UnknownStrategy(_) => ErrorKind::Configuration,
            Error::Computation(_) => ErrorKind::Computation,
            Error::Cancelled => ErrorKind::Cancelled,
        }
    }
}
