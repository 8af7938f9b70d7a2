//! # Theme Derivation
//!
//! Pure functions computing readable colors from the theme.
//!
//! Colors are `#RRGGBB` or `#RGB`. Malformed input has luminance 0.

use serde::Serialize;
use sonasite_document::Theme;

pub const BLACK: &str = "#000000";
pub const WHITE: &str = "#FFFFFF";

/// Above this luminance, text on top of the color is drawn black
const CONTRAST_THRESHOLD: f64 = 0.5;

/// Above this luminance, the primary color is too light for text on white
const ACCENT_TEXT_THRESHOLD: f64 = 0.6;

/// Decode `#RRGGBB` / `#RGB` (leading `#` optional) into 8-bit channels
pub fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };

    let channel = |i: usize| {
        expanded
            .get(i..i + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
    };

    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Perceived brightness in `[0, 1]`: `(0.299 R + 0.587 G + 0.114 B) / 255`
pub fn relative_luminance(hex: &str) -> f64 {
    match parse_hex(hex) {
        Some([r, g, b]) => {
            (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0
        }
        None => 0.0,
    }
}

/// Text color for content drawn on top of `hex`
pub fn contrast_color(hex: &str) -> &'static str {
    if relative_luminance(hex) > CONTRAST_THRESHOLD {
        BLACK
    } else {
        WHITE
    }
}

/// Color for text painted in the primary accent on a white background.
///
/// A light primary is replaced by the secondary color.
pub fn safe_accent_text_color(theme: &Theme) -> &str {
    if relative_luminance(&theme.primary_color) > ACCENT_TEXT_THRESHOLD {
        &theme.secondary_color
    } else {
        &theme.primary_color
    }
}

/// Colors derived from a theme, published when the theme changes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub font_family: String,
    /// Text color on a primary-colored background
    pub primary_contrast: String,
    /// Primary accent usable as text on white
    pub safe_accent_text: String,
}

impl ThemeColors {
    pub fn derive(theme: &Theme) -> Self {
        Self {
            primary: theme.primary_color.clone(),
            secondary: theme.secondary_color.clone(),
            font_family: theme.font_family.clone(),
            primary_contrast: contrast_color(&theme.primary_color).to_string(),
            safe_accent_text: safe_accent_text_color(theme).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme(primary: &str, secondary: &str) -> Theme {
        Theme {
            primary_color: primary.to_string(),
            secondary_color: secondary.to_string(),
            font_family: "Inter".to_string(),
        }
    }

    #[test]
    fn test_contrast_extremes() {
        assert_eq!(contrast_color("#FFFFFF"), BLACK);
        assert_eq!(contrast_color("#000000"), WHITE);
    }

    #[test]
    fn test_shorthand_is_expanded() {
        assert_eq!(parse_hex("#fa0"), Some([0xff, 0xaa, 0x00]));
        assert_eq!(relative_luminance("#fff"), relative_luminance("#ffffff"));
        assert_eq!(contrast_color("#fff"), BLACK);
    }

    #[test]
    fn test_malformed_input_has_zero_luminance() {
        assert_eq!(relative_luminance(""), 0.0);
        assert_eq!(relative_luminance("#12345"), 0.0);
        assert_eq!(relative_luminance("#zzzzzz"), 0.0);
        assert_eq!(relative_luminance("#ééé"), 0.0);
        assert_eq!(contrast_color("nope"), WHITE);
    }

    #[test]
    fn test_luminance_weights() {
        let red = relative_luminance("#ff0000");
        assert!((red - 0.299).abs() < 1e-9);
        let green = relative_luminance("#00ff00");
        assert!((green - 0.587).abs() < 1e-9);
    }

    #[test]
    fn test_light_primary_falls_back_to_secondary() {
        let light = theme("#fde68a", "#92400e");
        assert_eq!(safe_accent_text_color(&light), "#92400e");

        let dark = theme("#7c3aed", "#4c1d95");
        assert_eq!(safe_accent_text_color(&dark), "#7c3aed");
    }

    #[test]
    fn test_derived_colors() {
        let colors = ThemeColors::derive(&Theme::default());
        assert_eq!(colors.primary_contrast, WHITE);
        assert_eq!(colors.safe_accent_text, "#7c3aed");
    }
}
