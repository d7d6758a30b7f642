use std::fmt;

use serde_json::{Map, Value};

use crate::error::{Result, ShapeError};
use crate::path::FieldPath;

/// Declarative description of an acceptable input value.
///
/// Validating a payload against a shape either yields a normalized value
/// (defaults applied, unknown object fields dropped) or fails with the
/// first violation found. A `null` value never counts as absence; only a
/// missing object field does.
#[derive(Debug, Clone)]
pub struct Shape {
    kind: ShapeKind,
}

#[derive(Debug, Clone)]
enum ShapeKind {
    String {
        min_len: Option<usize>,
        max_len: Option<usize>,
    },
    Number {
        integer: bool,
        min: Option<f64>,
        max: Option<f64>,
    },
    Boolean,
    OneOf {
        literals: Vec<String>,
    },
    Sequence {
        item: Box<Shape>,
        min_len: Option<usize>,
        max_len: Option<usize>,
    },
    Object {
        fields: Vec<Field>,
    },
}

#[derive(Debug, Clone)]
struct Field {
    name: String,
    shape: Shape,
    presence: Presence,
}

#[derive(Debug, Clone)]
enum Presence {
    Required,
    Optional,
    Default(Value),
}

impl Shape {
    /// Shape accepting a string.
    pub fn string() -> StringShape {
        StringShape {
            min_len: None,
            max_len: None,
        }
    }

    /// Shape accepting any JSON number.
    pub fn number() -> NumberShape {
        NumberShape {
            integer: false,
            min: None,
            max: None,
        }
    }

    /// Shape accepting JSON integers only; fractional numbers are rejected.
    pub fn integer() -> NumberShape {
        NumberShape {
            integer: true,
            min: None,
            max: None,
        }
    }

    /// Shape accepting a boolean.
    pub fn boolean() -> Shape {
        Shape {
            kind: ShapeKind::Boolean,
        }
    }

    /// Shape accepting one of a fixed set of string literals.
    pub fn one_of<I, S>(literals: I) -> Shape
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Shape {
            kind: ShapeKind::OneOf {
                literals: literals.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// Shape accepting an ordered sequence of `item`-shaped entries.
    pub fn sequence(item: impl Into<Shape>) -> SequenceShape {
        SequenceShape {
            item: item.into(),
            min_len: None,
            max_len: None,
        }
    }

    /// Shape accepting an object with declared fields.
    ///
    /// Fields not declared on the shape are dropped during normalization.
    pub fn object() -> ObjectShape {
        ObjectShape { fields: Vec::new() }
    }

    /// Validate `value`, returning the normalized payload or the first
    /// violation with its field path.
    pub fn validate(&self, value: &Value) -> Result<Value> {
        self.check(value, &FieldPath::root())
    }

    fn check(&self, value: &Value, path: &FieldPath) -> Result<Value> {
        match &self.kind {
            ShapeKind::String { min_len, max_len } => {
                let text = value
                    .as_str()
                    .ok_or_else(|| type_mismatch(path, "a string", value))?;
                let chars = text.chars().count();
                if let Some(min) = *min_len {
                    if chars < min {
                        return Err(ShapeError::new(
                            path.clone(),
                            format!("must be at least {}", counted(min, "character")),
                        ));
                    }
                }
                if let Some(max) = *max_len {
                    if chars > max {
                        return Err(ShapeError::new(
                            path.clone(),
                            format!("must be at most {}", counted(max, "character")),
                        ));
                    }
                }
                Ok(value.clone())
            }
            ShapeKind::Number { integer, min, max } => {
                let n = value
                    .as_f64()
                    .ok_or_else(|| type_mismatch(path, "a number", value))?;
                if *integer && value.as_i64().is_none() {
                    return Err(ShapeError::new(path.clone(), "must be an integer"));
                }
                if let Some(min) = *min {
                    if n < min {
                        return Err(ShapeError::new(
                            path.clone(),
                            format!("must be at least {}", fmt_num(min)),
                        ));
                    }
                }
                if let Some(max) = *max {
                    if n > max {
                        return Err(ShapeError::new(
                            path.clone(),
                            format!("must be at most {}", fmt_num(max)),
                        ));
                    }
                }
                Ok(value.clone())
            }
            ShapeKind::Boolean => {
                let flag = value
                    .as_bool()
                    .ok_or_else(|| type_mismatch(path, "a boolean", value))?;
                Ok(Value::Bool(flag))
            }
            ShapeKind::OneOf { literals } => {
                let text = value
                    .as_str()
                    .ok_or_else(|| type_mismatch(path, "a string", value))?;
                if !literals.iter().any(|literal| literal == text) {
                    return Err(ShapeError::new(
                        path.clone(),
                        format!("must be one of: {}", literals.join(", ")),
                    ));
                }
                Ok(value.clone())
            }
            ShapeKind::Sequence {
                item,
                min_len,
                max_len,
            } => {
                let entries = value
                    .as_array()
                    .ok_or_else(|| type_mismatch(path, "an array", value))?;
                if let Some(min) = *min_len {
                    if entries.len() < min {
                        return Err(ShapeError::new(
                            path.clone(),
                            format!("must contain at least {}", counted(min, "item")),
                        ));
                    }
                }
                if let Some(max) = *max_len {
                    if entries.len() > max {
                        return Err(ShapeError::new(
                            path.clone(),
                            format!("must contain at most {}", counted(max, "item")),
                        ));
                    }
                }
                let mut normalized = Vec::with_capacity(entries.len());
                for (index, entry) in entries.iter().enumerate() {
                    normalized.push(item.check(entry, &path.index(index))?);
                }
                Ok(Value::Array(normalized))
            }
            ShapeKind::Object { fields } => {
                let map = value
                    .as_object()
                    .ok_or_else(|| type_mismatch(path, "an object", value))?;
                let mut normalized = Map::new();
                for field in fields {
                    let field_path = path.key(&field.name);
                    match map.get(&field.name) {
                        Some(entry) => {
                            normalized
                                .insert(field.name.clone(), field.shape.check(entry, &field_path)?);
                        }
                        None => match &field.presence {
                            Presence::Required => {
                                return Err(ShapeError::new(field_path, "missing required field"));
                            }
                            Presence::Optional => {}
                            Presence::Default(default) => {
                                normalized.insert(field.name.clone(), default.clone());
                            }
                        },
                    }
                }
                Ok(Value::Object(normalized))
            }
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ShapeKind::String { min_len, max_len } => {
                write!(f, "string")?;
                write_len_bounds(f, *min_len, *max_len)
            }
            ShapeKind::Number { integer, min, max } => {
                write!(f, "{}", if *integer { "integer" } else { "number" })?;
                write_num_bounds(f, *min, *max)
            }
            ShapeKind::Boolean => write!(f, "boolean"),
            ShapeKind::OneOf { literals } => write!(f, "enum({})", literals.join("|")),
            ShapeKind::Sequence {
                item,
                min_len,
                max_len,
            } => {
                write!(f, "{item}[]")?;
                write_len_bounds(f, *min_len, *max_len)
            }
            ShapeKind::Object { fields } => {
                write!(f, "{{")?;
                for (position, field) in fields.iter().enumerate() {
                    if position > 0 {
                        write!(f, ", ")?;
                    }
                    match &field.presence {
                        Presence::Required => write!(f, "{}: {}", field.name, field.shape)?,
                        Presence::Optional => write!(f, "{}?: {}", field.name, field.shape)?,
                        Presence::Default(default) => {
                            write!(f, "{}?: {} = {}", field.name, field.shape, default)?;
                        }
                    }
                }
                write!(f, "}}")
            }
        }
    }
}

/// Builder for string shapes.
#[derive(Debug, Clone)]
pub struct StringShape {
    min_len: Option<usize>,
    max_len: Option<usize>,
}

impl StringShape {
    /// Minimum length in characters.
    pub fn min_len(mut self, len: usize) -> Self {
        self.min_len = Some(len);
        self
    }

    /// Maximum length in characters.
    pub fn max_len(mut self, len: usize) -> Self {
        self.max_len = Some(len);
        self
    }
}

impl From<StringShape> for Shape {
    fn from(builder: StringShape) -> Self {
        Shape {
            kind: ShapeKind::String {
                min_len: builder.min_len,
                max_len: builder.max_len,
            },
        }
    }
}

/// Builder for number and integer shapes.
#[derive(Debug, Clone)]
pub struct NumberShape {
    integer: bool,
    min: Option<f64>,
    max: Option<f64>,
}

impl NumberShape {
    /// Minimum accepted value, inclusive.
    pub fn min(mut self, value: impl Into<f64>) -> Self {
        self.min = Some(value.into());
        self
    }

    /// Maximum accepted value, inclusive.
    pub fn max(mut self, value: impl Into<f64>) -> Self {
        self.max = Some(value.into());
        self
    }
}

impl From<NumberShape> for Shape {
    fn from(builder: NumberShape) -> Self {
        Shape {
            kind: ShapeKind::Number {
                integer: builder.integer,
                min: builder.min,
                max: builder.max,
            },
        }
    }
}

/// Builder for sequence shapes.
#[derive(Debug, Clone)]
pub struct SequenceShape {
    item: Shape,
    min_len: Option<usize>,
    max_len: Option<usize>,
}

impl SequenceShape {
    /// Minimum number of entries.
    pub fn min_len(mut self, len: usize) -> Self {
        self.min_len = Some(len);
        self
    }

    /// Maximum number of entries.
    pub fn max_len(mut self, len: usize) -> Self {
        self.max_len = Some(len);
        self
    }
}

impl From<SequenceShape> for Shape {
    fn from(builder: SequenceShape) -> Self {
        Shape {
            kind: ShapeKind::Sequence {
                item: Box::new(builder.item),
                min_len: builder.min_len,
                max_len: builder.max_len,
            },
        }
    }
}

/// Builder for object shapes. Field order is preserved in summaries.
#[derive(Debug, Clone)]
pub struct ObjectShape {
    fields: Vec<Field>,
}

impl ObjectShape {
    /// Declare a field that must be present.
    pub fn required(mut self, name: impl Into<String>, shape: impl Into<Shape>) -> Self {
        self.fields.push(Field {
            name: name.into(),
            shape: shape.into(),
            presence: Presence::Required,
        });
        self
    }

    /// Declare a field that may be absent. Absent fields stay absent in
    /// the normalized payload.
    pub fn optional(mut self, name: impl Into<String>, shape: impl Into<Shape>) -> Self {
        self.fields.push(Field {
            name: name.into(),
            shape: shape.into(),
            presence: Presence::Optional,
        });
        self
    }

    /// Declare an optional field that normalizes to `default` when absent.
    /// The default is trusted; it is not re-validated against the shape.
    pub fn with_default(
        mut self,
        name: impl Into<String>,
        shape: impl Into<Shape>,
        default: Value,
    ) -> Self {
        self.fields.push(Field {
            name: name.into(),
            shape: shape.into(),
            presence: Presence::Default(default),
        });
        self
    }
}

impl From<ObjectShape> for Shape {
    fn from(builder: ObjectShape) -> Self {
        Shape {
            kind: ShapeKind::Object {
                fields: builder.fields,
            },
        }
    }
}

fn type_mismatch(path: &FieldPath, expected: &str, actual: &Value) -> ShapeError {
    ShapeError::new(
        path.clone(),
        format!("expected {expected}, got {}", json_type(actual)),
    )
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn counted(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn write_len_bounds(
    f: &mut fmt::Formatter<'_>,
    min: Option<usize>,
    max: Option<usize>,
) -> fmt::Result {
    match (min, max) {
        (None, None) => Ok(()),
        (Some(min), None) => write!(f, "({min}..)"),
        (None, Some(max)) => write!(f, "(..{max})"),
        (Some(min), Some(max)) => write!(f, "({min}..{max})"),
    }
}

fn write_num_bounds(f: &mut fmt::Formatter<'_>, min: Option<f64>, max: Option<f64>) -> fmt::Result {
    match (min, max) {
        (None, None) => Ok(()),
        (Some(min), None) => write!(f, "({}..)", fmt_num(min)),
        (None, Some(max)) => write!(f, "(..{})", fmt_num(max)),
        (Some(min), Some(max)) => write!(f, "({}..{})", fmt_num(min), fmt_num(max)),
    }
}
