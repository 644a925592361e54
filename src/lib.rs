//! A typed, composable value-conversion engine.
//!
//! `valconv` maps values between a "model" representation (what the
//! application works with) and a "store" representation (what gets
//! persisted). Each direction is authored once as a pure mapping; the
//! engine derives both a type-erased form over [`Value`] for runtime
//! dispatch and keeps the exact, statically typed form for codegen-style
//! consumption.
//!
//! The three load-bearing pieces:
//!
//! - [`compose`]: chains two independently authored converters, inserting a
//!   [`CastingConverter`] when their adjoining nullability differs, and
//!   merging their [`MappingHints`].
//! - [`NumericBytesConverter`]: a bit-exact, always-big-endian byte codec
//!   over twelve numeric kinds, including the four-word 128-bit decimal
//!   layout.
//! - [`default_info`]: per-kind registration records the surrounding
//!   type-mapping layer uses to discover built-in converters lazily.
//!
//! ```
//! use std::sync::Arc;
//! use valconv::{compose, Converter, NumericBytesConverter, ScalarKind, TypeDesc, Value, ValueConverter};
//!
//! # fn main() -> valconv::Result<()> {
//! // a user converter: u16 model, i32 store
//! let widen: Arc<dyn Converter> =
//!     ValueConverter::new(|v: u16| Ok(i32::from(v)), |v: i32| Ok(v as u16)).erased();
//!
//! // chain it into the built-in byte codec
//! let codec: Arc<dyn Converter> =
//!     Arc::new(NumericBytesConverter::new(TypeDesc::new(ScalarKind::I32))?);
//! let chained = compose(widen, Some(codec))?;
//!
//! assert_eq!(chained.to_store(Value::U16(1))?, Value::Bytes(vec![0, 0, 0, 1]));
//! # Ok(())
//! # }
//! ```
//!
//! Every converter is immutable after construction and safe for
//! unrestricted concurrent use; construction itself is pure and
//! non-blocking.

pub mod converter;
pub mod defaults;
mod error;
mod hints;
pub mod scalar;
mod type_desc;
mod value;

pub use crate::{
    converter::{
        check_type_supported, compose, ByteCodec, CastingConverter, Converter,
        NumericBytesConverter, ValueConverter, ValueConverterBuilder,
    },
    defaults::{default_info, ConverterInfo},
    error::{ConvertError, Result},
    hints::MappingHints,
    scalar::{Scalar, ScalarValue},
    type_desc::{ScalarKind, TypeDesc},
    value::{CodeUnit, Value},
};
