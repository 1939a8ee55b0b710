//! Error types for path parsing, path writes, conversion and property copying.

use thiserror::Error;

/// Errors raised while coercing a value to a declared kind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// The value has no representation in the requested kind.
    #[error("cannot convert {from} to {to}")]
    Unsupported { from: String, to: String },

    /// A string could not be parsed as the requested kind.
    #[error("cannot parse '{input}' as {to}")]
    Parse { input: String, to: String },

    /// A number does not fit the requested width.
    #[error("{value} is out of range for {to}")]
    OutOfRange { value: String, to: String },
}

/// Errors that can occur while working with bean paths and copying properties.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BeanError {
    /// The path expression is malformed (unbalanced brackets).
    #[error("bad expression '{expression}' at {offset}: {reason}")]
    InvalidExpression {
        expression: String,
        offset: usize,
        reason: String,
    },

    /// A single property could not be converted or assigned.
    #[error("cannot assign property '{field}' ({source_type} -> {target_type}): {reason}")]
    PropertyAssignment {
        field: String,
        source_type: String,
        target_type: String,
        reason: String,
    },

    /// A sequence was addressed with something that is not an integer.
    #[error("'{segment}' is not a valid index")]
    InvalidIndex { segment: String },

    /// The addressed location cannot be written to.
    #[error("cannot write '{segment}' into {container}")]
    Unwritable { segment: String, container: String },

    /// The copy target is not an instance of the editable type.
    #[error("target of type '{target}' is not editable as '{editable}'")]
    NotEditable { target: String, editable: String },

    /// The copy source cannot enumerate properties.
    #[error("cannot copy from {0}")]
    UnsupportedSource(String),

    /// The copy target cannot receive properties.
    #[error("cannot copy into {0}")]
    UnsupportedTarget(String),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

pub type Result<T> = std::result::Result<T, BeanError>;
