/// A specialized `Result` type for baking operations.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur while baking a value into Go source.
///
/// Every variant names the stage that failed. None of them are recoverable
/// within a single run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("read {0}")]
    Read(String, #[source] std::io::Error),
    #[error("name {0:?} has no letters to form an identifier")]
    EmptyName(String),
    #[error("gzip compression failed")]
    Compress(#[source] std::io::Error),
    #[error("gzip decompression failed")]
    Decompress(#[source] std::io::Error),
    #[error("write {0}")]
    Write(String, #[source] std::io::Error),
}
