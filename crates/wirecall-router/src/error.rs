use wirecall_shape::ShapeError;

use crate::procedure::HandlerError;

/// Errors raised while building a router. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A procedure with this name is already registered.
    #[error("duplicate procedure: {0}")]
    DuplicateProcedure(String),

    /// Procedure name violates the naming rules.
    #[error("invalid procedure name {0:?}: {1}")]
    InvalidName(String, String),
}

/// Errors returned to the caller of a dispatch.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    /// No procedure is registered under this name.
    #[error("unknown procedure: {0}")]
    NotFound(String),

    /// Input payload failed shape validation.
    #[error(transparent)]
    Validation(#[from] ShapeError),

    /// A protected procedure was called without a principal.
    #[error("unauthorized: {0} requires an authenticated caller")]
    Unauthorized(String),

    /// The handler failed. The cause stays attached as the error source
    /// but the outward message is generic.
    #[error("internal error")]
    Internal(#[source] HandlerError),
}

impl CallError {
    /// Stable machine-readable tag for callers that discriminate errors.
    pub fn kind(&self) -> &'static str {
        match self {
            CallError::NotFound(_) => "not_found",
            CallError::Validation(_) => "invalid_input",
            CallError::Unauthorized(_) => "unauthorized",
            CallError::Internal(_) => "internal",
        }
    }
}

pub type Result<T, E = CallError> = std::result::Result<T, E>;
