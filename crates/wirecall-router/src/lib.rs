//! Procedure registry and dispatch for the wirecall contract layer.
//!
//! A [`Router`] owns the set of [`Procedure`]s registered at startup and
//! dispatches calls against them: resolve by name, validate the raw
//! payload against the declared shape, enforce the access level, invoke
//! the handler. Every failure surfaces as a structured [`CallError`]
//! rather than a panic, so callers can discriminate and render it.

pub mod context;
pub mod error;
pub mod procedure;
pub mod router;

pub use context::{CallContext, Principal};
pub use error::{CallError, RegistryError, Result};
pub use procedure::{
    Access, Handler, HandlerError, Procedure, ProcedureKind, MAX_PROCEDURE_NAME_LEN,
};
pub use router::Router;
