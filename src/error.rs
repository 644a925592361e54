//! Types for working with errors produced by the conversion engine.

use crate::{
    type_desc::{ScalarKind, TypeDesc},
    value::Value,
};

/// A specialized `Result` type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Represents all the ways construction, composition, or conversion can fail.
///
/// Every failure is local, synchronous, and non-retryable; nothing is
/// swallowed or retried internally, and there is no partial success.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// A required mapping was never supplied to a converter builder.
    #[error("missing {direction} mapping for converter")]
    NullMapping { direction: &'static str },

    /// A converter was asked to handle a type outside its supported set.
    #[error("type {ty} is not supported by {converter} (supported: {})", .allowed.iter().map(|k| k.name()).collect::<Vec<_>>().join(", "))]
    UnsupportedType {
        ty: TypeDesc,
        converter: &'static str,
        allowed: Vec<ScalarKind>,
    },

    /// Composition was attempted between converters whose adjoining types
    /// do not match after nullability normalization.
    #[error("cannot compose converter {first_model} -> {first_store} with converter {second_model} -> {second_store}")]
    IncompatibleConverters {
        first_model: TypeDesc,
        first_store: TypeDesc,
        second_model: TypeDesc,
        second_store: TypeDesc,
    },

    /// A runtime value could not be coerced to the expected kind.
    #[error("cannot coerce {from} to {to}")]
    TypeCoercion { from: String, to: ScalarKind },

    /// A byte sequence had the wrong length or invalid content for the
    /// target kind.
    #[error("malformed byte sequence for {kind}: {reason}")]
    MalformedInput { kind: ScalarKind, reason: String },
}

impl ConvertError {
    pub(crate) fn wrong_length(kind: ScalarKind, expected: usize, actual: usize) -> ConvertError {
        ConvertError::MalformedInput {
            kind,
            reason: format!("expected {expected} bytes, got {actual}"),
        }
    }

    pub(crate) fn coercion(from: &Value, to: ScalarKind) -> ConvertError {
        let from = match from.kind() {
            Some(kind) => kind.name().to_owned(),
            None => "null".to_owned(),
        };
        ConvertError::TypeCoercion { from, to }
    }
}
