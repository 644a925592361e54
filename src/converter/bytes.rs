//! Big-endian byte codec for the numeric kinds.
//!
//! The stored representation is always big-endian regardless of host
//! architecture; that portability is the codec's entire reason for
//! existing. Every encoding has a fixed width per kind (1, 2, 4, 8, or 16
//! bytes), and `decode(encode(x)) == x` for every representable `x` of
//! every supported kind.

use rust_decimal::Decimal;

use crate::{
    converter::{check_type_supported, Converter, ValueConverter},
    error::{ConvertError, Result},
    hints::MappingHints,
    scalar::{Scalar, ScalarValue},
    type_desc::{ScalarKind, TypeDesc},
    value::{CodeUnit, Value},
};

/// The kinds the byte codec supports, in width order.
pub const SUPPORTED_KINDS: [ScalarKind; 12] = [
    ScalarKind::I8,
    ScalarKind::U8,
    ScalarKind::I16,
    ScalarKind::U16,
    ScalarKind::Char,
    ScalarKind::I32,
    ScalarKind::U32,
    ScalarKind::F32,
    ScalarKind::I64,
    ScalarKind::U64,
    ScalarKind::F64,
    ScalarKind::Decimal,
];

/// The wire width in bytes for `kind`, or `None` if the codec does not
/// support it.
pub fn byte_count(kind: ScalarKind) -> Option<usize> {
    Some(match kind {
        ScalarKind::I8 | ScalarKind::U8 => 1,
        ScalarKind::I16 | ScalarKind::U16 | ScalarKind::Char => 2,
        ScalarKind::I32 | ScalarKind::U32 | ScalarKind::F32 => 4,
        ScalarKind::I64 | ScalarKind::U64 | ScalarKind::F64 => 8,
        ScalarKind::Decimal => 16,
        _ => return None,
    })
}

/// A numeric carrier with a fixed-width, big-endian wire form.
pub trait ByteCodec: Scalar + ScalarValue + Copy {
    /// Wire width in bytes.
    const BYTE_COUNT: usize;

    fn to_be_vec(self) -> Vec<u8>;

    /// Fails with [`ConvertError::MalformedInput`] when `bytes` is not
    /// exactly [`Self::BYTE_COUNT`] long, or when its content is not a
    /// valid encoding for the kind.
    fn from_be_slice(bytes: &[u8]) -> Result<Self>;
}

macro_rules! byte_codec {
    ($ty:ty, $n:expr) => {
        impl ByteCodec for $ty {
            const BYTE_COUNT: usize = $n;

            fn to_be_vec(self) -> Vec<u8> {
                self.to_be_bytes().to_vec()
            }

            fn from_be_slice(bytes: &[u8]) -> Result<Self> {
                let arr: [u8; $n] = bytes
                    .try_into()
                    .map_err(|_| ConvertError::wrong_length(<$ty as Scalar>::KIND, $n, bytes.len()))?;
                Ok(<$ty>::from_be_bytes(arr))
            }
        }
    };
}

byte_codec!(i8, 1);
byte_codec!(u8, 1);
byte_codec!(i16, 2);
byte_codec!(u16, 2);
byte_codec!(i32, 4);
byte_codec!(u32, 4);
byte_codec!(f32, 4);
byte_codec!(i64, 8);
byte_codec!(u64, 8);
byte_codec!(f64, 8);

impl ByteCodec for CodeUnit {
    const BYTE_COUNT: usize = 2;

    fn to_be_vec(self) -> Vec<u8> {
        self.0.to_be_bytes().to_vec()
    }

    fn from_be_slice(bytes: &[u8]) -> Result<Self> {
        u16::from_be_slice(bytes)
            .map(CodeUnit)
            .map_err(|_| ConvertError::wrong_length(ScalarKind::Char, 2, bytes.len()))
    }
}

/// The largest scale the decimal kind can carry.
const MAX_DECIMAL_SCALE: u32 = 28;

/// Decimal wire form: four 32-bit words, each big-endian, in the order
/// flags (sign in bit 31, scale in bits 16-23), high, middle, low.
impl ByteCodec for Decimal {
    const BYTE_COUNT: usize = 16;

    fn to_be_vec(self) -> Vec<u8> {
        let mantissa = self.mantissa().unsigned_abs();
        let lo = mantissa as u32;
        let mid = (mantissa >> 32) as u32;
        let hi = (mantissa >> 64) as u32;
        let mut flags = self.scale() << 16;
        if self.is_sign_negative() {
            flags |= 1 << 31;
        }

        let mut out = Vec::with_capacity(16);
        out.extend_from_slice(&flags.to_be_bytes());
        out.extend_from_slice(&hi.to_be_bytes());
        out.extend_from_slice(&mid.to_be_bytes());
        out.extend_from_slice(&lo.to_be_bytes());
        out
    }

    fn from_be_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 16 {
            return Err(ConvertError::wrong_length(ScalarKind::Decimal, 16, bytes.len()));
        }
        let word = |i: usize| u32::from_be_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
        let flags = word(0);
        let hi = word(4);
        let mid = word(8);
        let lo = word(12);

        // only the sign bit and the scale byte may be set in the flags word
        if flags & 0x7F00_FFFF != 0 {
            return Err(ConvertError::MalformedInput {
                kind: ScalarKind::Decimal,
                reason: format!("reserved flag bits set: {flags:#010x}"),
            });
        }
        let negative = flags & (1 << 31) != 0;
        let scale = (flags >> 16) & 0xFF;
        if scale > MAX_DECIMAL_SCALE {
            return Err(ConvertError::MalformedInput {
                kind: ScalarKind::Decimal,
                reason: format!("scale {scale} exceeds the maximum of {MAX_DECIMAL_SCALE}"),
            });
        }
        Ok(Decimal::from_parts(lo, mid, hi, negative, scale))
    }
}

fn unsupported(ty: TypeDesc) -> ConvertError {
    ConvertError::UnsupportedType {
        ty,
        converter: NumericBytesConverter::NAME,
        allowed: SUPPORTED_KINDS.to_vec(),
    }
}

fn encode_value(value: Value, kind: ScalarKind) -> Result<Vec<u8>> {
    Ok(match value {
        Value::I8(v) => v.to_be_vec(),
        Value::U8(v) => v.to_be_vec(),
        Value::I16(v) => v.to_be_vec(),
        Value::U16(v) => v.to_be_vec(),
        Value::Char(v) => v.to_be_vec(),
        Value::I32(v) => v.to_be_vec(),
        Value::U32(v) => v.to_be_vec(),
        Value::F32(v) => v.to_be_vec(),
        Value::I64(v) => v.to_be_vec(),
        Value::U64(v) => v.to_be_vec(),
        Value::F64(v) => v.to_be_vec(),
        Value::Decimal(v) => v.to_be_vec(),
        other => return Err(ConvertError::coercion(&other, kind)),
    })
}

fn decode_value(kind: ScalarKind, bytes: &[u8]) -> Result<Value> {
    Ok(match kind {
        ScalarKind::I8 => Value::I8(i8::from_be_slice(bytes)?),
        ScalarKind::U8 => Value::U8(u8::from_be_slice(bytes)?),
        ScalarKind::I16 => Value::I16(i16::from_be_slice(bytes)?),
        ScalarKind::U16 => Value::U16(u16::from_be_slice(bytes)?),
        ScalarKind::Char => Value::Char(CodeUnit::from_be_slice(bytes)?),
        ScalarKind::I32 => Value::I32(i32::from_be_slice(bytes)?),
        ScalarKind::U32 => Value::U32(u32::from_be_slice(bytes)?),
        ScalarKind::F32 => Value::F32(f32::from_be_slice(bytes)?),
        ScalarKind::I64 => Value::I64(i64::from_be_slice(bytes)?),
        ScalarKind::U64 => Value::U64(u64::from_be_slice(bytes)?),
        ScalarKind::F64 => Value::F64(f64::from_be_slice(bytes)?),
        ScalarKind::Decimal => Value::Decimal(Decimal::from_be_slice(bytes)?),
        other => return Err(unsupported(TypeDesc::new(other))),
    })
}

/// Encodes any supported numeric kind to a fixed-width, big-endian byte
/// sequence and back.
///
/// The supported kind set is validated at construction; a null input
/// encodes to null (a distinct absence marker, not an empty sequence) and
/// decodes back to null.
#[derive(Debug, Clone)]
pub struct NumericBytesConverter {
    model: TypeDesc,
    size: usize,
    hints: MappingHints,
}

impl NumericBytesConverter {
    pub const NAME: &'static str = "NumericBytesConverter";

    /// A converter for `model` with the default hints
    /// (`size = byte_count`, fixed length).
    ///
    /// Fails with [`ConvertError::UnsupportedType`] unless `model`'s base
    /// kind is one of [`SUPPORTED_KINDS`].
    pub fn new(model: TypeDesc) -> Result<Self> {
        Self::with_hints(model, None)
    }

    /// Like [`new`](Self::new), with caller hints taking precedence over
    /// the defaults field by field.
    pub fn with_hints(model: TypeDesc, hints: Option<MappingHints>) -> Result<Self> {
        check_type_supported(model, Self::NAME, &SUPPORTED_KINDS)?;
        let size = byte_count(model.kind()).ok_or_else(|| unsupported(model))?;
        let defaults = Self::default_hints(size);
        let hints = match hints {
            Some(hints) => hints.merge(&defaults),
            None => defaults,
        };
        Ok(NumericBytesConverter { model, size, hints })
    }

    /// The statically typed form for carrier `T`.
    pub fn typed<T: ByteCodec>() -> ValueConverter<T, Vec<u8>> {
        ValueConverter::with_hints(
            |v: T| Ok(v.to_be_vec()),
            |bytes: Vec<u8>| T::from_be_slice(&bytes),
            Self::default_hints(T::BYTE_COUNT),
        )
    }

    pub(crate) fn default_hints(size: usize) -> MappingHints {
        MappingHints::new().with_size(size).with_fixed_length(true)
    }

    /// The wire width for this converter's kind.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Converter for NumericBytesConverter {
    fn model_type(&self) -> TypeDesc {
        self.model
    }

    fn store_type(&self) -> TypeDesc {
        if self.model.is_nullable() {
            TypeDesc::nullable(ScalarKind::Bytes)
        } else {
            TypeDesc::new(ScalarKind::Bytes)
        }
    }

    fn to_store(&self, value: Value) -> Result<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let value = value.coerce(self.model.kind())?;
        Ok(Value::Bytes(encode_value(value, self.model.kind())?))
    }

    fn from_store(&self, value: Value) -> Result<Value> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Bytes(bytes) => decode_value(self.model.kind(), &bytes),
            other => Err(ConvertError::coercion(&other, ScalarKind::Bytes)),
        }
    }

    fn hints(&self) -> MappingHints {
        self.hints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_word_layout() {
        // 1 with scale 0: flags clear, magnitude in the low word
        let bytes = Decimal::ONE.to_be_vec();
        assert_eq!(bytes[..12], [0; 12]);
        assert_eq!(bytes[12..], [0, 0, 0, 1]);

        // sign lives in bit 31 of the flags word, scale in bits 16-23
        let value = Decimal::from_parts(1, 0, 0, true, 28);
        let bytes = value.to_be_vec();
        assert_eq!(bytes[0], 0x80);
        assert_eq!(bytes[1], 28);
        assert_eq!(Decimal::from_be_slice(&bytes).unwrap(), value);
    }

    #[test]
    fn construction_rejects_unsupported_kinds() {
        for kind in [ScalarKind::Bool, ScalarKind::Text, ScalarKind::Bytes] {
            let err = NumericBytesConverter::new(TypeDesc::new(kind)).unwrap_err();
            assert!(matches!(err, ConvertError::UnsupportedType { .. }));
        }
    }

    #[test]
    fn caller_hints_override_defaults_field_by_field() {
        let conv = NumericBytesConverter::with_hints(
            TypeDesc::new(ScalarKind::I32),
            Some(MappingHints::new().with_precision(9)),
        )
        .unwrap();
        let hints = conv.hints();
        assert_eq!(hints.size, Some(4));
        assert_eq!(hints.precision, Some(9));
        assert_eq!(hints.is_fixed_length, Some(true));
    }

    #[test]
    fn nullable_model_has_nullable_store() {
        let conv = NumericBytesConverter::new(TypeDesc::nullable(ScalarKind::I64)).unwrap();
        assert!(conv.store_type().is_nullable());
        assert_eq!(conv.store_type().kind(), ScalarKind::Bytes);
    }
}
