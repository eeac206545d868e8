use std::io;
use thiserror::Error;

/// Errors surfaced by bounded stream operations.
///
/// Premature connection termination is deliberately not a variant here: the
/// read contract reports it through the same end-of-stream outcome as
/// normal exhaustion, and callers tell the two apart by checking the
/// remaining budget afterwards.
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl StreamError {
    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
