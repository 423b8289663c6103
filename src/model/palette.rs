//! Bar colors and opacity levels.

use serde::{Deserialize, Serialize};

/// RGB triple.
pub type Rgb = (u8, u8, u8);

/// The fixed visualization palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarColor {
    /// Untouched bar.
    #[default]
    Default,
    /// Being compared.
    Comparing,
    /// Being swapped or written, also the pivot and the running minimum.
    Swapping,
    /// In its final position.
    Sorted,
    /// Search hit.
    Found,
}

impl BarColor {
    /// Every palette entry.
    pub const ALL: [Self; 5] = [
        Self::Default,
        Self::Comparing,
        Self::Swapping,
        Self::Sorted,
        Self::Found,
    ];

    /// Red, green, blue components.
    #[must_use]
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Default => (0x3b, 0x82, 0xf6),
            Self::Comparing => (0xea, 0xb3, 0x08),
            Self::Swapping => (0xef, 0x44, 0x44),
            Self::Sorted => (0x22, 0xc5, 0x5e),
            Self::Found => (0xa8, 0x55, 0xf7),
        }
    }

    /// CSS hex string, e.g. `#3b82f6`.
    #[must_use]
    pub fn hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Legend text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "unsorted",
            Self::Comparing => "comparing",
            Self::Swapping => "swapping",
            Self::Sorted => "sorted",
            Self::Found => "found",
        }
    }
}

/// Opacity levels used by the searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Opacity {
    /// Fully visible.
    #[default]
    Opaque,
    /// Already visited by a linear scan.
    Checked,
    /// Eliminated by a binary-search step.
    Eliminated,
}

impl Opacity {
    /// Alpha in `[0, 1]`.
    #[must_use]
    pub const fn alpha(self) -> f32 {
        match self {
            Self::Opaque => 1.0,
            Self::Checked => 0.5,
            Self::Eliminated => 0.3,
        }
    }

    /// Whether the bar should be drawn dimmed.
    #[must_use]
    pub const fn is_dimmed(self) -> bool {
        !matches!(self, Self::Opaque)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_hex() {
        assert_eq!(BarColor::Default.hex(), "#3b82f6");
        assert_eq!(BarColor::Comparing.hex(), "#eab308");
        assert_eq!(BarColor::Swapping.hex(), "#ef4444");
        assert_eq!(BarColor::Sorted.hex(), "#22c55e");
        assert_eq!(BarColor::Found.hex(), "#a855f7");
    }

    #[test]
    fn test_palette_distinct() {
        for (i, a) in BarColor::ALL.iter().enumerate() {
            for b in &BarColor::ALL[i + 1..] {
                assert_ne!(a.rgb(), b.rgb());
            }
        }
    }

    #[test]
    fn test_opacity_alpha() {
        assert!((Opacity::Opaque.alpha() - 1.0).abs() < f32::EPSILON);
        assert!((Opacity::Checked.alpha() - 0.5).abs() < f32::EPSILON);
        assert!((Opacity::Eliminated.alpha() - 0.3).abs() < f32::EPSILON);
        assert!(!Opacity::Opaque.is_dimmed());
        assert!(Opacity::Checked.is_dimmed());
    }

    #[test]
    fn test_color_serializes_snake_case() {
        let json = serde_json::to_string(&BarColor::Sorted).unwrap();
        assert_eq!(json, "\"sorted\"");
    }
}
