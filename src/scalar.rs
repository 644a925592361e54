//! The statically typed seam between Rust carrier types and [`Value`].

use rust_decimal::Decimal;

use crate::{
    error::ConvertError,
    type_desc::{ScalarKind, TypeDesc},
    value::{CodeUnit, Value},
};

/// A concrete Rust carrier for one scalar kind.
pub trait Scalar: Sized + Send + Sync + 'static {
    /// The base kind this type carries.
    const KIND: ScalarKind;

    fn into_value(self) -> Value;

    /// Exact extraction: the value must already be of [`Self::KIND`].
    fn from_value(value: Value) -> Result<Self, ConvertError>;
}

macro_rules! scalar {
    ($ty:ty, $kind:ident) => {
        impl Scalar for $ty {
            const KIND: ScalarKind = ScalarKind::$kind;

            fn into_value(self) -> Value {
                Value::$kind(self)
            }

            fn from_value(value: Value) -> Result<Self, ConvertError> {
                match value {
                    Value::$kind(v) => Ok(v),
                    other => Err(ConvertError::coercion(&other, ScalarKind::$kind)),
                }
            }
        }

        impl ScalarValue for $ty {
            fn type_desc() -> TypeDesc {
                TypeDesc::new(ScalarKind::$kind)
            }

            fn into_value(self) -> Value {
                Scalar::into_value(self)
            }

            fn from_value(value: Value) -> Result<Self, ConvertError> {
                Scalar::from_value(value)
            }
        }
    };
}

scalar!(i8, I8);
scalar!(i16, I16);
scalar!(i32, I32);
scalar!(i64, I64);
scalar!(u8, U8);
scalar!(u16, U16);
scalar!(u32, U32);
scalar!(u64, U64);
scalar!(f32, F32);
scalar!(f64, F64);
scalar!(CodeUnit, Char);
scalar!(Decimal, Decimal);
scalar!(bool, Bool);
scalar!(String, Text);
scalar!(Vec<u8>, Bytes);

/// The erased boundary used by typed converters: supplies the full type
/// descriptor (including nullability) and the [`Value`] conversion.
///
/// Implemented for every [`Scalar`] carrier and, with a nullable
/// descriptor, for `Option<T>` where `T: Scalar`.
pub trait ScalarValue: Sized + Send + Sync + 'static {
    fn type_desc() -> TypeDesc;

    fn into_value(self) -> Value;

    fn from_value(value: Value) -> Result<Self, ConvertError>;
}

impl<T: Scalar> ScalarValue for Option<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::nullable(T::KIND)
    }

    fn into_value(self) -> Value {
        match self {
            Some(v) => Scalar::into_value(v),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        if value.is_null() {
            Ok(None)
        } else {
            Scalar::from_value(value).map(Some)
        }
    }
}
