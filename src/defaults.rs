//! Registration records for the built-in converters.
//!
//! The surrounding type-mapping layer discovers built-in converters through
//! these records without constructing them eagerly; the registry behind
//! them is populated at most once per process and is safe under concurrent
//! first access.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::{
    converter::{
        bytes::{byte_count, NumericBytesConverter, SUPPORTED_KINDS},
        Converter,
    },
    error::{ConvertError, Result},
    hints::MappingHints,
    type_desc::{ScalarKind, TypeDesc},
};

type Factory = Arc<dyn Fn(Option<MappingHints>) -> Result<Arc<dyn Converter>> + Send + Sync>;

/// Describes a built-in converter without constructing it.
#[derive(Clone)]
pub struct ConverterInfo {
    pub model_type: TypeDesc,
    pub store_type: TypeDesc,
    pub default_hints: MappingHints,
    factory: Factory,
}

impl ConverterInfo {
    /// Construct the converter this record describes. Caller hints take
    /// precedence over the defaults field by field.
    pub fn create(&self, hints: Option<MappingHints>) -> Result<Arc<dyn Converter>> {
        (self.factory)(hints)
    }
}

impl fmt::Debug for ConverterInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterInfo")
            .field("model_type", &self.model_type)
            .field("store_type", &self.store_type)
            .field("default_hints", &self.default_hints)
            .finish_non_exhaustive()
    }
}

static REGISTRY: OnceLock<HashMap<ScalarKind, ConverterInfo>> = OnceLock::new();

fn registry() -> &'static HashMap<ScalarKind, ConverterInfo> {
    REGISTRY.get_or_init(|| {
        tracing::debug!("initializing default converter registry");
        SUPPORTED_KINDS
            .iter()
            .filter_map(|&kind| {
                let size = byte_count(kind)?;
                let model = TypeDesc::new(kind);
                let info = ConverterInfo {
                    model_type: model,
                    store_type: TypeDesc::new(ScalarKind::Bytes),
                    default_hints: NumericBytesConverter::default_hints(size),
                    factory: Arc::new(move |hints| {
                        let converter = NumericBytesConverter::with_hints(model, hints)?;
                        Ok(Arc::new(converter) as Arc<dyn Converter>)
                    }),
                };
                Some((kind, info))
            })
            .collect()
    })
}

/// The registration record for `kind`'s built-in byte codec.
///
/// Fails with [`ConvertError::UnsupportedType`] for a kind with no
/// built-in converter.
pub fn default_info(kind: ScalarKind) -> Result<&'static ConverterInfo> {
    registry().get(&kind).ok_or_else(|| ConvertError::UnsupportedType {
        ty: TypeDesc::new(kind),
        converter: NumericBytesConverter::NAME,
        allowed: SUPPORTED_KINDS.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn records_exist_for_every_supported_kind() {
        for kind in SUPPORTED_KINDS {
            let info = default_info(kind).unwrap();
            assert_eq!(info.model_type, TypeDesc::new(kind));
            assert_eq!(info.store_type, TypeDesc::new(ScalarKind::Bytes));
            assert_eq!(info.default_hints.size, byte_count(kind));
            assert_eq!(info.default_hints.is_fixed_length, Some(true));
        }
    }

    #[test]
    fn factory_builds_a_working_converter() {
        let info = default_info(ScalarKind::I32).unwrap();
        let converter = info.create(None).unwrap();
        let encoded = converter.to_store(Value::I32(1)).unwrap();
        assert_eq!(encoded, Value::Bytes(vec![0, 0, 0, 1]));
    }

    #[test]
    fn factory_honors_caller_hints() {
        let info = default_info(ScalarKind::I16).unwrap();
        let converter = info
            .create(Some(MappingHints::new().with_unicode(false)))
            .unwrap();
        assert_eq!(converter.hints().size, Some(2));
        assert_eq!(converter.hints().is_unicode, Some(false));
    }

    #[test]
    fn no_record_for_unsupported_kinds() {
        assert!(matches!(
            default_info(ScalarKind::Bool),
            Err(ConvertError::UnsupportedType { .. })
        ));
    }
}
