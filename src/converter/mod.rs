//! The converter facade and the composition operation.

pub mod bytes;
mod cast;
mod typed;

pub use bytes::{ByteCodec, NumericBytesConverter};
pub use cast::CastingConverter;
pub use typed::{ValueConverter, ValueConverterBuilder};

use std::sync::Arc;

use crate::{
    error::{ConvertError, Result},
    hints::MappingHints,
    type_desc::{ScalarKind, TypeDesc},
    value::Value,
};

/// The type-erased converter facade.
///
/// Every implementation is immutable after construction and safe to share
/// across threads behind an `Arc`. The erased conversion functions pass
/// null through unchanged and tolerate near-miss runtime kinds via the
/// numeric coercion table; the exact typed mappings remain available on
/// [`ValueConverter`] for codegen-style consumption.
pub trait Converter: Send + Sync {
    /// The declared model-side type, including nullability.
    fn model_type(&self) -> TypeDesc;

    /// The declared store-side type, including nullability.
    fn store_type(&self) -> TypeDesc;

    /// Convert a model value to its store representation.
    fn to_store(&self, value: Value) -> Result<Value>;

    /// Convert a store value back to its model representation.
    fn from_store(&self, value: Value) -> Result<Value>;

    /// Facet hints for the store representation.
    fn hints(&self) -> MappingHints;
}

/// Rejects `ty` unless its base kind is in `allowed`.
///
/// Concrete converters call this at construction time so an unsupported
/// type parameter fails up front rather than at first conversion.
pub fn check_type_supported(
    ty: TypeDesc,
    converter: &'static str,
    allowed: &[ScalarKind],
) -> Result<()> {
    if allowed.contains(&ty.kind()) {
        Ok(())
    } else {
        Err(ConvertError::UnsupportedType {
            ty,
            converter,
            allowed: allowed.to_vec(),
        })
    }
}

struct Composed {
    first: Arc<dyn Converter>,
    second: Arc<dyn Converter>,
    hints: MappingHints,
}

impl Converter for Composed {
    fn model_type(&self) -> TypeDesc {
        self.first.model_type()
    }

    fn store_type(&self) -> TypeDesc {
        self.second.store_type()
    }

    fn to_store(&self, value: Value) -> Result<Value> {
        self.second.to_store(self.first.to_store(value)?)
    }

    fn from_store(&self, value: Value) -> Result<Value> {
        self.first.from_store(self.second.from_store(value)?)
    }

    fn hints(&self) -> MappingHints {
        self.hints
    }
}

/// Chains two converters end to end.
///
/// With no `second`, returns `first` unchanged. The adjoining types must
/// match with nullability stripped, or composition fails with
/// [`ConvertError::IncompatibleConverters`]. When `first`'s store type is
/// nullable and `second`'s model type is not, a [`CastingConverter`] is
/// inserted between them to bridge the mismatch.
///
/// The result is an ordinary converter: closed under further composition,
/// and associative in behavior. Its hints are the two converters' hints
/// merged with the second (outer) converter winning ties.
pub fn compose(
    first: Arc<dyn Converter>,
    second: Option<Arc<dyn Converter>>,
) -> Result<Arc<dyn Converter>> {
    let Some(second) = second else {
        return Ok(first);
    };

    if first.store_type().base() != second.model_type().base() {
        return Err(ConvertError::IncompatibleConverters {
            first_model: first.model_type(),
            first_store: first.store_type(),
            second_model: second.model_type(),
            second_store: second.store_type(),
        });
    }

    let first = if first.store_type().is_nullable() && !second.model_type().is_nullable() {
        let bridge: Arc<dyn Converter> = Arc::new(CastingConverter::new(
            first.store_type(),
            second.model_type(),
        ));
        compose(first, Some(bridge))?
    } else {
        first
    };

    tracing::trace!(
        model = %first.model_type(),
        mid = %first.store_type(),
        store = %second.store_type(),
        "composing converters"
    );

    let hints = second.hints().merge(&first.hints());
    Ok(Arc::new(Composed {
        first,
        second,
        hints,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_type_supported_rejects_outsiders() {
        let allowed = [ScalarKind::I32, ScalarKind::I64];
        assert!(check_type_supported(TypeDesc::new(ScalarKind::I32), "test", &allowed).is_ok());
        assert!(
            check_type_supported(TypeDesc::nullable(ScalarKind::I64), "test", &allowed).is_ok()
        );

        let err = check_type_supported(TypeDesc::new(ScalarKind::Bool), "test", &allowed)
            .unwrap_err();
        match err {
            ConvertError::UnsupportedType {
                ty,
                converter,
                allowed,
            } => {
                assert_eq!(ty, TypeDesc::new(ScalarKind::Bool));
                assert_eq!(converter, "test");
                assert_eq!(allowed, vec![ScalarKind::I32, ScalarKind::I64]);
            }
            other => panic!("expected UnsupportedType, got {other:?}"),
        }
    }
}
