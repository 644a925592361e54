//! Static type descriptors attached to every converter.

use std::fmt::{self, Display, Formatter};

/// Base scalar kinds known to the conversion engine.
///
/// The numeric kinds (everything up to and including `Decimal`) are the
/// kinds the byte codec can carry; `Bool`, `Text`, and `Bytes` exist so that
/// user converters over those carriers can participate in composition.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ScalarKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,

    /// A single 16-bit character code unit.
    Char,

    /// 128-bit fixed-point decimal: 96-bit magnitude, sign, and scale.
    Decimal,

    Bool,
    Text,
    Bytes,
}

impl ScalarKind {
    pub fn name(&self) -> &'static str {
        match self {
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::Char => "char16",
            ScalarKind::Decimal => "decimal",
            ScalarKind::Bool => "bool",
            ScalarKind::Text => "text",
            ScalarKind::Bytes => "bytes",
        }
    }
}

impl Display for ScalarKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A static type descriptor: a base kind plus nullability.
///
/// Composition compatibility is checked on [`TypeDesc::base`], which strips
/// nullability, so a converter over `T` can sit next to one expecting
/// nullable `T` (modulo an inserted cast).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TypeDesc {
    kind: ScalarKind,
    nullable: bool,
}

impl TypeDesc {
    /// A non-nullable descriptor for `kind`.
    pub const fn new(kind: ScalarKind) -> Self {
        TypeDesc {
            kind,
            nullable: false,
        }
    }

    /// A nullable descriptor for `kind`.
    pub const fn nullable(kind: ScalarKind) -> Self {
        TypeDesc {
            kind,
            nullable: true,
        }
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// The same descriptor with nullability stripped.
    pub fn base(&self) -> TypeDesc {
        TypeDesc::new(self.kind)
    }
}

impl Display for TypeDesc {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}?", self.kind)
        } else {
            self.kind.fmt(f)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_strips_nullability() {
        let nullable = TypeDesc::nullable(ScalarKind::I32);
        assert!(nullable.is_nullable());
        assert_eq!(nullable.base(), TypeDesc::new(ScalarKind::I32));
        assert!(!nullable.base().is_nullable());
    }

    #[test]
    fn display_marks_nullable() {
        assert_eq!(TypeDesc::new(ScalarKind::I32).to_string(), "i32");
        assert_eq!(TypeDesc::nullable(ScalarKind::I32).to_string(), "i32?");
        assert_eq!(TypeDesc::new(ScalarKind::Char).to_string(), "char16");
    }
}
