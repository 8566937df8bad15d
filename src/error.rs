/// Errors surfaced by the hashing facade and the epoch context cache.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A boundary buffer had the wrong size. Raised before the cache is
    /// consulted and before any output is written.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The engine could not build a dataset for the requested epoch. The
    /// previously resident context, if any, is left in place.
    #[error("failed to build context for epoch {epoch}: {reason}")]
    EpochBuild { epoch: u64, reason: String },
}
