//! The strongly-typed converter and its builder.

use std::sync::Arc;

use crate::{
    converter::Converter,
    error::{ConvertError, Result},
    hints::MappingHints,
    scalar::ScalarValue,
    type_desc::TypeDesc,
    value::Value,
};

type Mapping<A, B> = Arc<dyn Fn(A) -> Result<B> + Send + Sync>;

/// A strongly-typed, bidirectional converter between a model carrier `M`
/// and a store carrier `S`.
///
/// Both directions are pure, fallible mappings supplied at construction and
/// kept accessible unmodified through [`to_store_exact`] and
/// [`from_store_exact`]. Downstream codegen-style consumers need the exact
/// user-supplied logic, not the null-tolerant erased adapter. The erased
/// form is the [`Converter`] impl, derived at the trait boundary: it passes
/// null through without invoking the mapping and coerces near-miss runtime
/// kinds via the numeric coercion table before dispatching.
///
/// [`to_store_exact`]: ValueConverter::to_store_exact
/// [`from_store_exact`]: ValueConverter::from_store_exact
pub struct ValueConverter<M, S> {
    to_store: Mapping<M, S>,
    from_store: Mapping<S, M>,
    hints: MappingHints,
}

impl<M, S> Clone for ValueConverter<M, S> {
    fn clone(&self) -> Self {
        ValueConverter {
            to_store: Arc::clone(&self.to_store),
            from_store: Arc::clone(&self.from_store),
            hints: self.hints,
        }
    }
}

impl<M: ScalarValue, S: ScalarValue> ValueConverter<M, S> {
    pub fn new(
        to_store: impl Fn(M) -> Result<S> + Send + Sync + 'static,
        from_store: impl Fn(S) -> Result<M> + Send + Sync + 'static,
    ) -> Self {
        Self::with_hints(to_store, from_store, MappingHints::new())
    }

    pub fn with_hints(
        to_store: impl Fn(M) -> Result<S> + Send + Sync + 'static,
        from_store: impl Fn(S) -> Result<M> + Send + Sync + 'static,
        hints: MappingHints,
    ) -> Self {
        ValueConverter {
            to_store: Arc::new(to_store),
            from_store: Arc::new(from_store),
            hints,
        }
    }

    /// A fallible construction surface; reports
    /// [`ConvertError::NullMapping`] for a direction never supplied.
    pub fn builder() -> ValueConverterBuilder<M, S> {
        ValueConverterBuilder {
            to_store: None,
            from_store: None,
            hints: MappingHints::new(),
        }
    }

    /// The exact model-to-store mapping as supplied at construction.
    pub fn to_store_exact(&self, model: M) -> Result<S> {
        (self.to_store)(model)
    }

    /// The exact store-to-model mapping as supplied at construction.
    pub fn from_store_exact(&self, store: S) -> Result<M> {
        (self.from_store)(store)
    }

    /// `M`'s declared type, including nullability.
    pub fn model_type(&self) -> TypeDesc {
        M::type_desc()
    }

    /// `S`'s declared type, including nullability.
    pub fn store_type(&self) -> TypeDesc {
        S::type_desc()
    }

    pub fn hints(&self) -> MappingHints {
        self.hints
    }

    /// Statically checked composition: the typed form of
    /// [`compose`](crate::converter::compose). The result maps
    /// `M -> S -> T` forward and back, with `second`'s hints winning ties.
    pub fn compose_with<T: ScalarValue>(&self, second: &ValueConverter<S, T>) -> ValueConverter<M, T> {
        let f1 = Arc::clone(&self.to_store);
        let f2 = Arc::clone(&second.to_store);
        let g1 = Arc::clone(&self.from_store);
        let g2 = Arc::clone(&second.from_store);
        ValueConverter {
            to_store: Arc::new(move |m| f2(f1(m)?)),
            from_store: Arc::new(move |s| g1(g2(s)?)),
            hints: second.hints.merge(&self.hints),
        }
    }

    /// The same converter with its directions swapped: the store carrier
    /// becomes the model carrier.
    pub fn invert(&self) -> ValueConverter<S, M> {
        ValueConverter {
            to_store: Arc::clone(&self.from_store),
            from_store: Arc::clone(&self.to_store),
            hints: self.hints,
        }
    }

    /// The erased form, shareable as a trait object.
    pub fn erased(self) -> Arc<dyn Converter> {
        Arc::new(self)
    }
}

impl<M: ScalarValue, S: ScalarValue> Converter for ValueConverter<M, S> {
    fn model_type(&self) -> TypeDesc {
        M::type_desc()
    }

    fn store_type(&self) -> TypeDesc {
        S::type_desc()
    }

    fn to_store(&self, value: Value) -> Result<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let model = M::from_value(value.coerce(M::type_desc().kind())?)?;
        Ok((self.to_store)(model)?.into_value())
    }

    fn from_store(&self, value: Value) -> Result<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let store = S::from_value(value.coerce(S::type_desc().kind())?)?;
        Ok((self.from_store)(store)?.into_value())
    }

    fn hints(&self) -> MappingHints {
        self.hints
    }
}

/// Builder for [`ValueConverter`]; the fallible construction path.
pub struct ValueConverterBuilder<M, S> {
    to_store: Option<Mapping<M, S>>,
    from_store: Option<Mapping<S, M>>,
    hints: MappingHints,
}

impl<M: ScalarValue, S: ScalarValue> ValueConverterBuilder<M, S> {
    pub fn to_store(mut self, mapping: impl Fn(M) -> Result<S> + Send + Sync + 'static) -> Self {
        self.to_store = Some(Arc::new(mapping));
        self
    }

    pub fn from_store(mut self, mapping: impl Fn(S) -> Result<M> + Send + Sync + 'static) -> Self {
        self.from_store = Some(Arc::new(mapping));
        self
    }

    pub fn hints(mut self, hints: MappingHints) -> Self {
        self.hints = hints;
        self
    }

    /// Fails with [`ConvertError::NullMapping`] if either direction was
    /// never supplied.
    pub fn build(self) -> Result<ValueConverter<M, S>> {
        let to_store = self.to_store.ok_or(ConvertError::NullMapping {
            direction: "model-to-store",
        })?;
        let from_store = self.from_store.ok_or(ConvertError::NullMapping {
            direction: "store-to-model",
        })?;
        Ok(ValueConverter {
            to_store,
            from_store,
            hints: self.hints,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_desc::ScalarKind;

    fn widening() -> ValueConverter<i32, i64> {
        ValueConverter::new(|v: i32| Ok(i64::from(v)), |v: i64| Ok(v as i32))
    }

    #[test]
    fn exact_mappings_are_preserved() {
        let conv = widening();
        assert_eq!(conv.to_store_exact(7).unwrap(), 7_i64);
        assert_eq!(conv.from_store_exact(7).unwrap(), 7_i32);
        assert_eq!(conv.model_type(), TypeDesc::new(ScalarKind::I32));
        assert_eq!(conv.store_type(), TypeDesc::new(ScalarKind::I64));
    }

    #[test]
    fn erased_form_passes_null_through() {
        let conv = widening();
        assert_eq!(conv.to_store(Value::Null).unwrap(), Value::Null);
        assert_eq!(conv.from_store(Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn erased_form_coerces_near_miss_kinds() {
        let conv = widening();
        // an i16 arrives where an i32 is declared
        assert_eq!(conv.to_store(Value::I16(5)).unwrap(), Value::I64(5));
        // nothing in the coercion table reaches i32 from bool
        assert!(matches!(
            conv.to_store(Value::Bool(true)),
            Err(ConvertError::TypeCoercion { .. })
        ));
    }

    #[test]
    fn builder_requires_both_directions() {
        let missing_from = ValueConverter::<i32, i64>::builder()
            .to_store(|v| Ok(i64::from(v)))
            .build();
        assert!(matches!(
            missing_from,
            Err(ConvertError::NullMapping {
                direction: "store-to-model"
            })
        ));

        let missing_to = ValueConverter::<i32, i64>::builder()
            .from_store(|v| Ok(v as i32))
            .build();
        assert!(matches!(
            missing_to,
            Err(ConvertError::NullMapping {
                direction: "model-to-store"
            })
        ));

        let built = ValueConverter::<i32, i64>::builder()
            .to_store(|v| Ok(i64::from(v)))
            .from_store(|v| Ok(v as i32))
            .hints(MappingHints::new().with_size(8))
            .build()
            .unwrap();
        assert_eq!(built.hints().size, Some(8));
    }

    #[test]
    fn invert_swaps_directions() {
        let conv = widening().invert();
        assert_eq!(conv.model_type(), TypeDesc::new(ScalarKind::I64));
        assert_eq!(conv.store_type(), TypeDesc::new(ScalarKind::I32));
        assert_eq!(conv.to_store_exact(9).unwrap(), 9_i32);
    }

    #[test]
    fn nullable_carriers_declare_nullability() {
        let conv: ValueConverter<i32, Option<i64>> =
            ValueConverter::new(|v| Ok(Some(i64::from(v))), |v| Ok(v.unwrap_or(0) as i32));
        assert!(!conv.model_type().is_nullable());
        assert!(conv.store_type().is_nullable());
    }
}
