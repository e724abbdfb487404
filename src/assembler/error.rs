//! Errors that stop the assembler.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A fail-fast session met an error diagnostic. Holds its formatted text.
    #[error("{0}")]
    Aborted(String),

    #[error("unable to open input file `{file}`: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
