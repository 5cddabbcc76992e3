//! Named color buckets and nearest-color classification

use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named color bucket used for visual matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedColor {
    Red,
    Blue,
    Green,
    Black,
    White,
    Gray,
    Brown,
    Yellow,
    Orange,
    Purple,
    Pink,
    /// Catch-all for images with no usable colors
    Multi,
}

impl NamedColor {
    /// All buckets, in the order ties are broken
    pub const ALL: [NamedColor; 12] = [
        NamedColor::Red,
        NamedColor::Blue,
        NamedColor::Green,
        NamedColor::Black,
        NamedColor::White,
        NamedColor::Gray,
        NamedColor::Brown,
        NamedColor::Yellow,
        NamedColor::Orange,
        NamedColor::Purple,
        NamedColor::Pink,
        NamedColor::Multi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NamedColor::Red => "Red",
            NamedColor::Blue => "Blue",
            NamedColor::Green => "Green",
            NamedColor::Black => "Black",
            NamedColor::White => "White",
            NamedColor::Gray => "Gray",
            NamedColor::Brown => "Brown",
            NamedColor::Yellow => "Yellow",
            NamedColor::Orange => "Orange",
            NamedColor::Purple => "Purple",
            NamedColor::Pink => "Pink",
            NamedColor::Multi => "Multi",
        }
    }

    /// Reference color for the bucket
    pub fn reference(&self) -> Srgb<u8> {
        match self {
            NamedColor::Red => Srgb::new(255, 0, 0),
            NamedColor::Blue => Srgb::new(0, 0, 255),
            NamedColor::Green => Srgb::new(0, 128, 0),
            NamedColor::Black => Srgb::new(0, 0, 0),
            NamedColor::White => Srgb::new(255, 255, 255),
            NamedColor::Gray => Srgb::new(128, 128, 128),
            NamedColor::Brown => Srgb::new(165, 42, 42),
            NamedColor::Yellow => Srgb::new(255, 255, 0),
            NamedColor::Orange => Srgb::new(255, 165, 0),
            NamedColor::Purple => Srgb::new(128, 0, 128),
            NamedColor::Pink => Srgb::new(255, 192, 203),
            // shares gray's reference, so it only wins by declaration order
            NamedColor::Multi => Srgb::new(128, 128, 128),
        }
    }

    /// Lower-case substrings that mark a product color as belonging to this bucket
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            NamedColor::Red => &["red", "maroon", "burgundy", "crimson", "ruby", "scarlet"],
            NamedColor::Blue => &[
                "blue", "navy", "aqua", "teal", "turquoise", "indigo", "ocean",
            ],
            NamedColor::Green => &["green", "olive", "lime", "mint", "forest", "sage"],
            NamedColor::Black => &["black", "onyx", "ebony"],
            NamedColor::White => &[
                "white", "ivory", "cream", "pearl", "ecru", "champagne", "blush",
            ],
            NamedColor::Gray => &["gray", "silver", "slate", "charcoal", "grey"],
            NamedColor::Brown => &["brown", "tan", "khaki", "beige", "natural", "earth"],
            NamedColor::Yellow => &["yellow", "gold", "amber", "mustard"],
            NamedColor::Orange => &["orange", "coral", "peach"],
            NamedColor::Purple => &["purple", "lavender", "violet", "plum", "mauve"],
            NamedColor::Pink => &["pink", "rose", "fuchsia", "magenta", "blush"],
            NamedColor::Multi => &[],
        }
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NamedColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        NamedColor::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown color: {}", s))
    }
}

/// Color library for classifying pixels into named buckets
pub struct ColorLib;

impl ColorLib {
    /// Bucket whose reference color is nearest in RGB space
    ///
    /// Ties go to the bucket declared first.
    pub fn nearest_color(rgb: Srgb<u8>) -> NamedColor {
        let mut closest = NamedColor::Multi;
        let mut min_distance = u32::MAX;

        for color in NamedColor::ALL {
            // squared distance orders the same as euclidean distance
            let distance = Self::distance_squared(rgb, color.reference());
            if distance < min_distance {
                min_distance = distance;
                closest = color;
            }
        }

        closest
    }

    /// Synonyms for a color name; unknown names have none
    pub fn synonyms_of(name: &str) -> &'static [&'static str] {
        name.parse::<NamedColor>()
            .map(|c| c.synonyms())
            .unwrap_or(&[])
    }

    /// Check a product color against a wanted color name.
    ///
    /// Matches on equal names (ignoring case), or when the product color
    /// contains one of the wanted color's synonyms.
    pub fn color_matches(product_color: &str, wanted: &str) -> bool {
        let product_lower = product_color.to_lowercase();
        if product_lower == wanted.to_lowercase() {
            return true;
        }

        Self::synonyms_of(wanted)
            .iter()
            .any(|synonym| product_lower.contains(synonym))
    }

    /// Convert RGB to hex string
    pub fn rgb_to_hex(rgb: Srgb<u8>) -> String {
        format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
    }

    /// Convert hex string to RGB
    pub fn hex_to_rgb(hex: &str) -> Option<Srgb<u8>> {
        let hex = hex.trim_start_matches('#');

        if hex.len() != 6 {
            return None;
        }

        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;

        Some(Srgb::new(r, g, b))
    }

    fn distance_squared(a: Srgb<u8>, b: Srgb<u8>) -> u32 {
        let dr = a.red as i32 - b.red as i32;
        let dg = a.green as i32 - b.green as i32;
        let db = a.blue as i32 - b.blue as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_colors_classify_to_themselves() {
        for color in NamedColor::ALL {
            let expected = if color == NamedColor::Multi {
                NamedColor::Gray
            } else {
                color
            };
            assert_eq!(ColorLib::nearest_color(color.reference()), expected);
        }
    }

    #[test]
    fn test_nearest_color() {
        assert_eq!(ColorLib::nearest_color(Srgb::new(230, 20, 20)), NamedColor::Red);
        assert_eq!(ColorLib::nearest_color(Srgb::new(20, 40, 160)), NamedColor::Blue);
        assert_eq!(ColorLib::nearest_color(Srgb::new(240, 200, 210)), NamedColor::Pink);
        assert_eq!(ColorLib::nearest_color(Srgb::new(120, 120, 125)), NamedColor::Gray);
    }

    #[test]
    fn test_synonyms_of() {
        assert!(ColorLib::synonyms_of("Blue").contains(&"navy"));
        assert!(ColorLib::synonyms_of("blue").contains(&"navy"));
        assert!(ColorLib::synonyms_of("Multi").is_empty());
        assert!(ColorLib::synonyms_of("Tortoise").is_empty());
    }

    #[test]
    fn test_color_matches() {
        assert!(ColorLib::color_matches("white", "White"));
        assert!(ColorLib::color_matches("Forest Green", "Green"));
        assert!(ColorLib::color_matches("Rose Gold", "Yellow"));
        assert!(ColorLib::color_matches("Rose Gold", "Pink"));
        assert!(ColorLib::color_matches("Multi", "Multi"));
        assert!(!ColorLib::color_matches("Tortoise", "Brown"));
        assert!(!ColorLib::color_matches("Black", "Gray"));
    }

    #[test]
    fn test_hex_roundtrip() {
        assert_eq!(ColorLib::rgb_to_hex(Srgb::new(165, 42, 42)), "#a52a2a");
        assert_eq!(ColorLib::hex_to_rgb("#a52a2a"), Some(Srgb::new(165, 42, 42)));
        assert_eq!(ColorLib::hex_to_rgb("fff"), None);
    }
}
