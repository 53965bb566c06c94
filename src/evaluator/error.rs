use thiserror::Error;

/// Errors produced while resolving a descriptor against the ambient environment.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum EvaluationError {
    /// A value needed to resolve the descriptor is absent or empty in the ambient environment.
    #[error("environment variable `{0}` is not set or empty")]
    MissingEnvironment(String),
}
