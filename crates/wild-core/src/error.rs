/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the core data model.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A stat key did not name one of the eight known stats.
    #[error("unknown stat: \"{0}\"")]
    UnknownStat(String),
}
