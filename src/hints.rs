//! Facet metadata carried by converters.

/// Optional facets guiding how the store representation is physically laid
/// out: intended size, numeric precision and scale, and unicode/fixed-length
/// flags.
///
/// A hints value is immutable; the `with_*` setters return an updated copy.
/// No cross-field validation is performed here (a scale larger than the
/// precision is the surrounding layer's problem to reject).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MappingHints {
    pub size: Option<usize>,
    pub precision: Option<u8>,
    pub scale: Option<u8>,
    pub is_unicode: Option<bool>,
    pub is_fixed_length: Option<bool>,
}

impl MappingHints {
    /// A hints value with no facets set.
    pub const fn new() -> Self {
        MappingHints {
            size: None,
            precision: None,
            scale: None,
            is_unicode: None,
            is_fixed_length: None,
        }
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn with_scale(mut self, scale: u8) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_unicode(mut self, is_unicode: bool) -> Self {
        self.is_unicode = Some(is_unicode);
        self
    }

    pub fn with_fixed_length(mut self, is_fixed_length: bool) -> Self {
        self.is_fixed_length = Some(is_fixed_length);
        self
    }

    /// Field-wise merge: `self`'s value wins where present, `other` fills
    /// the gaps.
    pub fn merge(&self, other: &MappingHints) -> MappingHints {
        MappingHints {
            size: self.size.or(other.size),
            precision: self.precision.or(other.precision),
            scale: self.scale.or(other.scale),
            is_unicode: self.is_unicode.or(other.is_unicode),
            is_fixed_length: self.is_fixed_length.or(other.is_fixed_length),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_self() {
        let a = MappingHints::new().with_size(4).with_unicode(true);
        let b = MappingHints::new().with_size(8).with_precision(10);

        let merged = a.merge(&b);
        assert_eq!(merged.size, Some(4));
        assert_eq!(merged.precision, Some(10));
        assert_eq!(merged.is_unicode, Some(true));
        assert_eq!(merged.scale, None);
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let a = MappingHints::new().with_size(2).with_fixed_length(true);
        assert_eq!(a.merge(&MappingHints::new()), a);
        assert_eq!(MappingHints::new().merge(&a), a);
    }
}
