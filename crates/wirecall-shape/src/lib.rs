//! Composable payload shapes for the wirecall contract layer.
//!
//! A [`Shape`] describes an acceptable input value the way the caller and
//! the server must agree on it: primitive types, optional fields, default
//! values, bounded ranges and lengths, string-literal enumerations, and
//! bounded sequences. Validating a raw payload against a shape either
//! yields a normalized value (defaults applied, unknown object fields
//! dropped) or fails with the field path of the first violation.

pub mod error;
pub mod path;
pub mod shape;

pub use error::{Result, ShapeError};
pub use path::FieldPath;
pub use shape::{NumberShape, ObjectShape, SequenceShape, Shape, StringShape};
