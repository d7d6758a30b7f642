use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::context::CallContext;
use crate::error::{CallError, RegistryError, Result};
use crate::procedure::{validate_name, Access, Procedure};

/// Name-keyed registry of procedures plus the dispatcher that invokes
/// them.
///
/// Registration happens once at startup; afterwards the router is
/// read-only, so any number of calls may run concurrently against it.
pub struct Router {
    procedures: HashMap<String, Procedure>,
}

impl Router {
    /// Create an empty router.
    pub fn new() -> Self {
        Self {
            procedures: HashMap::new(),
        }
    }

    /// Register a procedure. A duplicate or malformed name fails fast.
    pub fn register(&mut self, procedure: Procedure) -> Result<(), RegistryError> {
        let name = procedure.name().to_string();
        if let Err(reason) = validate_name(&name) {
            return Err(RegistryError::InvalidName(name, reason));
        }
        if self.procedures.contains_key(&name) {
            return Err(RegistryError::DuplicateProcedure(name));
        }
        debug!(
            procedure = %name,
            kind = procedure.kind().as_str(),
            access = procedure.access().as_str(),
            "procedure registered"
        );
        self.procedures.insert(name, procedure);
        Ok(())
    }

    /// Look up a registered procedure.
    pub fn resolve(&self, name: &str) -> Option<&Procedure> {
        self.procedures.get(name)
    }

    /// Number of registered procedures.
    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }

    /// Registered procedures, sorted by name.
    pub fn procedures(&self) -> Vec<&Procedure> {
        let mut all: Vec<&Procedure> = self.procedures.values().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
    }

    /// Dispatch one call: resolve the procedure, validate the raw input,
    /// enforce the access level, invoke the handler.
    ///
    /// A handler failure comes back as [`CallError::Internal`] with the
    /// cause attached as the error source; the cause is also logged here.
    pub fn invoke(&self, name: &str, input: Value, context: &CallContext) -> Result<Value> {
        let procedure = match self.resolve(name) {
            Some(procedure) => procedure,
            None => {
                warn!(procedure = name, "call to unknown procedure");
                return Err(CallError::NotFound(name.to_string()));
            }
        };

        let normalized = match procedure.input() {
            Some(shape) => match shape.validate(&input) {
                Ok(normalized) => normalized,
                Err(err) => {
                    warn!(
                        procedure = name,
                        path = %err.path,
                        reason = %err.reason,
                        "input rejected"
                    );
                    return Err(CallError::Validation(err));
                }
            },
            None => Value::Null,
        };

        if procedure.access() == Access::Protected && context.principal().is_none() {
            warn!(procedure = name, "unauthorized call to protected procedure");
            return Err(CallError::Unauthorized(name.to_string()));
        }

        debug!(
            procedure = name,
            kind = procedure.kind().as_str(),
            "dispatching"
        );
        match procedure.invoke_handler(normalized, context) {
            Ok(value) => Ok(value),
            Err(cause) => {
                error!(procedure = name, cause = %cause, "handler failed");
                Err(CallError::Internal(cause))
            }
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
