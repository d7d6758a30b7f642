use std::fmt;

use serde_json::Value;
use wirecall_shape::Shape;

use crate::context::CallContext;

/// Longest accepted procedure name in bytes.
pub const MAX_PROCEDURE_NAME_LEN: usize = 64;

/// Whether a procedure reads or changes state, mirroring the
/// query/mutation split callers see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcedureKind {
    Query,
    Mutation,
}

impl ProcedureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcedureKind::Query => "query",
            ProcedureKind::Mutation => "mutation",
        }
    }
}

/// Access level required to invoke a procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Callable by anyone.
    Public,
    /// Requires an authenticated principal in the call context.
    Protected,
}

impl Access {
    pub fn as_str(&self) -> &'static str {
        match self {
            Access::Public => "public",
            Access::Protected => "protected",
        }
    }
}

/// Failure a handler may return; the dispatcher wraps it as an internal
/// error.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Handler invoked with the normalized input and the caller context.
pub type Handler =
    dyn Fn(Value, &CallContext) -> std::result::Result<Value, HandlerError> + Send + Sync;

/// A named, independently invocable operation.
///
/// Built with [`Procedure::query`] or [`Procedure::mutation`], refined
/// with [`Procedure::with_input`] and [`Procedure::protected`], then
/// registered once at startup. Immutable thereafter.
pub struct Procedure {
    name: String,
    kind: ProcedureKind,
    access: Access,
    input: Option<Shape>,
    handler: Box<Handler>,
}

impl Procedure {
    /// Public query with no declared input shape.
    pub fn query<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Value, &CallContext) -> std::result::Result<Value, HandlerError>
            + Send
            + Sync
            + 'static,
    {
        Self::new(name, ProcedureKind::Query, handler)
    }

    /// Public mutation with no declared input shape.
    pub fn mutation<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Value, &CallContext) -> std::result::Result<Value, HandlerError>
            + Send
            + Sync
            + 'static,
    {
        Self::new(name, ProcedureKind::Mutation, handler)
    }

    fn new<F>(name: impl Into<String>, kind: ProcedureKind, handler: F) -> Self
    where
        F: Fn(Value, &CallContext) -> std::result::Result<Value, HandlerError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            kind,
            access: Access::Public,
            input: None,
            handler: Box::new(handler),
        }
    }

    /// Declare the shape raw payloads are validated against before the
    /// handler runs. Without one, the handler receives `Value::Null`.
    pub fn with_input(mut self, shape: impl Into<Shape>) -> Self {
        self.input = Some(shape.into());
        self
    }

    /// Require an authenticated principal in the call context.
    pub fn protected(mut self) -> Self {
        self.access = Access::Protected;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ProcedureKind {
        self.kind
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn input(&self) -> Option<&Shape> {
        self.input.as_ref()
    }

    pub(crate) fn invoke_handler(
        &self,
        input: Value,
        context: &CallContext,
    ) -> std::result::Result<Value, HandlerError> {
        (self.handler)(input, context)
    }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Procedure")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("access", &self.access)
            .field("input", &self.input)
            .finish_non_exhaustive()
    }
}

pub(crate) fn validate_name(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("must not be empty".to_string());
    }
    if name.len() > MAX_PROCEDURE_NAME_LEN {
        return Err(format!("exceeds {MAX_PROCEDURE_NAME_LEN} bytes"));
    }
    for segment in name.split('.') {
        if segment.is_empty() {
            return Err("contains an empty dotted segment".to_string());
        }
        if !segment
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        {
            return Err(
                "segments may only contain ASCII letters, digits and underscores".to_string(),
            );
        }
    }
    Ok(())
}
