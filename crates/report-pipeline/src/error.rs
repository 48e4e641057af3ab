use thiserror::Error;

/// Errors raised while resolving user-supplied view settings.
///
/// The pipeline stages themselves never fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("unknown sort field '{field}' (expected one of: {expected})")]
    UnknownSortField { field: String, expected: String },
}
