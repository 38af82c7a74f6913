//! Font declarations.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Opaque font id used by fragments to reference a declared font.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontId(pub String);

impl FontId {
    /// Create a font id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for FontId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A declared font.
///
/// Fonts compare by value: two declarations with the same size, family and
/// color are the same font even when they carry different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Font {
    /// Font size in points, as declared
    pub size: String,
    /// Font family name
    pub family: String,
    /// Color in `#rrggbb` form
    pub color: String,
}

impl Font {
    /// Create a new font.
    pub fn new(size: impl ToString, family: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            size: size.to_string(),
            family: family.into(),
            color: color.into(),
        }
    }
}

/// Document-wide font declarations, keyed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FontTable {
    fonts: BTreeMap<FontId, Font>,
}

impl FontTable {
    /// Create an empty font table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a font. A later declaration of the same id replaces the earlier one.
    pub fn declare(&mut self, id: FontId, font: Font) {
        self.fonts.insert(id, font);
    }

    /// Look up a font by id.
    pub fn get(&self, id: &FontId) -> Option<&Font> {
        self.fonts.get(id)
    }

    /// Look up a font referenced from `page`, failing on undeclared ids.
    pub fn resolve(&self, id: &FontId, page: u32) -> Result<&Font> {
        self.fonts.get(id).ok_or_else(|| Error::FontResolution {
            font: id.0.clone(),
            page,
        })
    }

    /// Number of declared fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Check if no fonts are declared.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_value_equality() {
        let a = Font::new(12, "Times", "#000000");
        let b = Font::new(12, "Times", "#000000");
        let c = Font::new(12, "Times", "#ff0000");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_fractional_sizes_stay_distinct() {
        assert_ne!(Font::new("10.5", "Times", "#000000"), Font::new("11", "Times", "#000000"));
        assert_eq!(Font::new(12, "Times", "#000000").size, "12");
    }

    #[test]
    fn test_resolve_missing_font() {
        let mut table = FontTable::new();
        table.declare(FontId::new("0"), Font::new(12, "Times", "#000000"));

        assert!(table.resolve(&FontId::new("0"), 1).is_ok());
        let err = table.resolve(&FontId::new("9"), 4).unwrap_err();
        assert!(matches!(err, Error::FontResolution { page: 4, .. }));
    }
}
