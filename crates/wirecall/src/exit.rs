use std::io;

use wirecall_router::{CallError, RegistryError};

// Exit codes are part of the CLI contract; scripts match on them.
pub const SUCCESS: i32 = 0;
pub const HEALTH_CHECK_FAILED: i32 = 30;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = std::result::Result<T, CliError>;

/// A CLI failure carrying the process exit code to use.
#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Map a payload-file read failure onto the exit-code contract.
pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::NotFound => USAGE,
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

/// Map a dispatch failure onto the exit-code contract.
pub fn call_error(context: &str, err: CallError) -> CliError {
    let code = match &err {
        CallError::NotFound(_) => USAGE,
        CallError::Validation(_) => DATA_INVALID,
        CallError::Unauthorized(_) => PERMISSION_DENIED,
        CallError::Internal(_) => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

/// Map a registration failure onto the exit-code contract.
pub fn registry_error(context: &str, err: RegistryError) -> CliError {
    CliError::new(INTERNAL, format!("{context}: {err}"))
}
