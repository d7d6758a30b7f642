//! Typed procedure-call contracts between a caller and an in-process
//! backend.
//!
//! wirecall provides a declarative shape layer that normalizes raw JSON
//! payloads or rejects them with field-path errors, and a router that
//! dispatches named query/mutation procedures with per-procedure access
//! control.
//!
//! # Crate Structure
//!
//! - [`shape`] — Composable input validators (normalize-or-fail)
//! - [`router`] — Procedure registry, call context, and dispatcher
//! - [`demo`] — The sample contract: seven procedures over synthesized
//!   data (behind `demo` feature)

/// Re-export shape types.
pub mod shape {
    pub use wirecall_shape::*;
}

/// Re-export router types.
pub mod router {
    pub use wirecall_router::*;
}

/// Re-export the demo contract (requires `demo` feature).
#[cfg(feature = "demo")]
pub mod demo {
    pub use wirecall_demo::*;
}
