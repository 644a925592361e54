use crate::{
    converter::Converter,
    error::Result,
    hints::MappingHints,
    type_desc::TypeDesc,
    value::Value,
};

/// A converter that adjusts nullability only; the mapping is the identity
/// and no value is transformed.
///
/// [`compose`](crate::converter::compose) inserts one of these when a
/// nullable store type meets a non-nullable model type. Like every erased
/// converter, it passes null through unchanged, so a genuinely null
/// intermediate value propagates as null rather than failing.
#[derive(Debug, Clone)]
pub struct CastingConverter {
    model: TypeDesc,
    store: TypeDesc,
}

impl CastingConverter {
    /// `model` and `store` must share a base kind; they may differ only in
    /// nullability.
    pub fn new(model: TypeDesc, store: TypeDesc) -> Self {
        debug_assert_eq!(model.base(), store.base());
        CastingConverter { model, store }
    }
}

impl Converter for CastingConverter {
    fn model_type(&self) -> TypeDesc {
        self.model
    }

    fn store_type(&self) -> TypeDesc {
        self.store
    }

    fn to_store(&self, value: Value) -> Result<Value> {
        Ok(value)
    }

    fn from_store(&self, value: Value) -> Result<Value> {
        Ok(value)
    }

    fn hints(&self) -> MappingHints {
        MappingHints::new()
    }
}
