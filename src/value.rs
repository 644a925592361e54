//! The type-erased runtime value and its coercion table.

use rust_decimal::Decimal;

use crate::{error::ConvertError, type_desc::ScalarKind};

/// A single 16-bit character code unit.
///
/// The engine's character kind is a UTF-16 code unit rather than a Unicode
/// scalar value, so every representable bit pattern survives a round trip
/// through the byte codec.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CodeUnit(pub u16);

impl From<u16> for CodeUnit {
    fn from(unit: u16) -> Self {
        CodeUnit(unit)
    }
}

impl From<CodeUnit> for u16 {
    fn from(unit: CodeUnit) -> Self {
        unit.0
    }
}

impl TryFrom<char> for CodeUnit {
    type Error = std::num::TryFromIntError;

    /// Succeeds for characters in the Basic Multilingual Plane.
    fn try_from(c: char) -> Result<Self, Self::Error> {
        Ok(CodeUnit(u16::try_from(u32::from(c))?))
    }
}

/// A type-erased runtime value: one variant per scalar kind, plus `Null` as
/// the distinct absence marker.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Char(CodeUnit),
    Decimal(Decimal),
    Bool(bool),
    Text(String),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The kind of this value, or `None` for `Null`.
    pub fn kind(&self) -> Option<ScalarKind> {
        Some(match self {
            Value::Null => return None,
            Value::I8(_) => ScalarKind::I8,
            Value::I16(_) => ScalarKind::I16,
            Value::I32(_) => ScalarKind::I32,
            Value::I64(_) => ScalarKind::I64,
            Value::U8(_) => ScalarKind::U8,
            Value::U16(_) => ScalarKind::U16,
            Value::U32(_) => ScalarKind::U32,
            Value::U64(_) => ScalarKind::U64,
            Value::F32(_) => ScalarKind::F32,
            Value::F64(_) => ScalarKind::F64,
            Value::Char(_) => ScalarKind::Char,
            Value::Decimal(_) => ScalarKind::Decimal,
            Value::Bool(_) => ScalarKind::Bool,
            Value::Text(_) => ScalarKind::Text,
            Value::Bytes(_) => ScalarKind::Bytes,
        })
    }

    /// The integral magnitude of this value, if it is an integer kind.
    ///
    /// The character kind participates as its 16-bit unsigned code unit.
    fn as_i128(&self) -> Option<i128> {
        Some(match *self {
            Value::I8(v) => i128::from(v),
            Value::I16(v) => i128::from(v),
            Value::I32(v) => i128::from(v),
            Value::I64(v) => i128::from(v),
            Value::U8(v) => i128::from(v),
            Value::U16(v) => i128::from(v),
            Value::U32(v) => i128::from(v),
            Value::U64(v) => i128::from(v),
            Value::Char(v) => i128::from(v.0),
            _ => return None,
        })
    }

    /// Coerce this value to `target` via the finite coercion table.
    ///
    /// Supported coercions: integer-to-integer with a range check,
    /// integer-to-float, integer-to-decimal, `f32`/`f64` widening and
    /// narrowing, and code-unit/`u16` interchange. Null passes through and
    /// a matching kind is returned unchanged. Anything else fails closed
    /// with [`ConvertError::TypeCoercion`].
    pub fn coerce(self, target: ScalarKind) -> Result<Value, ConvertError> {
        if self.is_null() || self.kind() == Some(target) {
            return Ok(self);
        }

        if let Some(i) = self.as_i128() {
            let coerced = match target {
                ScalarKind::I8 => i8::try_from(i).ok().map(Value::I8),
                ScalarKind::I16 => i16::try_from(i).ok().map(Value::I16),
                ScalarKind::I32 => i32::try_from(i).ok().map(Value::I32),
                ScalarKind::I64 => i64::try_from(i).ok().map(Value::I64),
                ScalarKind::U8 => u8::try_from(i).ok().map(Value::U8),
                ScalarKind::U16 => u16::try_from(i).ok().map(Value::U16),
                ScalarKind::U32 => u32::try_from(i).ok().map(Value::U32),
                ScalarKind::U64 => u64::try_from(i).ok().map(Value::U64),
                ScalarKind::Char => u16::try_from(i).ok().map(|u| Value::Char(CodeUnit(u))),
                ScalarKind::F32 => Some(Value::F32(i as f32)),
                ScalarKind::F64 => Some(Value::F64(i as f64)),
                ScalarKind::Decimal => Some(Value::Decimal(Decimal::from_i128_with_scale(i, 0))),
                _ => None,
            };
            return coerced.ok_or_else(|| ConvertError::coercion(&self, target));
        }

        match (&self, target) {
            (Value::F32(v), ScalarKind::F64) => Ok(Value::F64(f64::from(*v))),
            (Value::F64(v), ScalarKind::F32) => Ok(Value::F32(*v as f32)),
            _ => Err(ConvertError::coercion(&self, target)),
        }
    }
}
