//! Color definitions and palette management.
//!
//! RGB565 packs red and blue into 5 bits and green into 6; converting from
//! 8-bit RGB is R>>3, G>>2, B>>3.

use embedded_graphics::pixelcolor::Rgb565;

/// Primary background color - very dark gray-blue
pub const COLOR_BACKGROUND: Rgb565 = Rgb565::new(18 >> 3, 23 >> 2, 24 >> 3);

/// Surface color for raised elements - slightly lighter than background
pub const COLOR_SURFACE: Rgb565 = Rgb565::new(26 >> 3, 32 >> 2, 33 >> 3);

/// Border/stroke color - medium gray
pub const COLOR_STROKE: Rgb565 = Rgb565::new(43 >> 3, 55 >> 2, 57 >> 3);

/// Accent color for interactive elements - bright teal-green
pub const COLOR_ACCENT: Rgb565 = Rgb565::new(95 >> 3, 185 >> 2, 141 >> 3);

/// Secondary accent - moderate green
pub const COLOR_ACCENT_DIM: Rgb565 = Rgb565::new(76 >> 3, 154 >> 2, 113 >> 3);

/// Warning color - warm orange
pub const COLOR_WARNING: Rgb565 = Rgb565::new(200 >> 3, 145 >> 2, 85 >> 3);

/// Alert color - muted red
pub const COLOR_ALERT: Rgb565 = Rgb565::new(190 >> 3, 95 >> 2, 95 >> 3);

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

/// Light gray - for secondary text
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(21, 42, 21);

/// Medium gray - for disabled or tertiary text
pub const GRAY: Rgb565 = Rgb565::new(16, 32, 16);

/// Dark gray - for subtle text
pub const DARK_GRAY: Rgb565 = Rgb565::new(10, 20, 10);

/// A cohesive color palette for consistent UI theming.
///
/// Page-construction code reads widget colors from one palette so an entire
/// tree can switch between dark and light themes without touching layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Primary accent color - key interactive elements
    pub primary: Rgb565,

    /// Secondary accent color - less prominent actions
    pub secondary: Rgb565,

    /// Main background color
    pub background: Rgb565,

    /// Surface color for panels and elevated elements
    pub surface: Rgb565,

    /// Error and alert color
    pub error: Rgb565,

    /// Primary text color - high contrast
    pub text_primary: Rgb565,

    /// Secondary text color - lower contrast
    pub text_secondary: Rgb565,

    /// Border color for separators and outlines
    pub border: Rgb565,
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

impl Palette {
    /// Dark theme (default): light text on dark backgrounds, for low-light
    /// viewing.
    pub fn dark() -> Self {
        Self {
            primary: COLOR_ACCENT,
            secondary: COLOR_ACCENT_DIM,
            background: COLOR_BACKGROUND,
            surface: COLOR_SURFACE,
            error: COLOR_ALERT,
            text_primary: WHITE,
            text_secondary: LIGHT_GRAY,
            border: COLOR_STROKE,
        }
    }

    /// Light theme: dark text on light backgrounds.
    pub fn light() -> Self {
        Self {
            primary: COLOR_ACCENT,
            secondary: COLOR_ACCENT_DIM,
            background: WHITE,
            surface: COLOR_SURFACE,
            error: COLOR_ALERT,
            text_primary: COLOR_BACKGROUND,
            text_secondary: DARK_GRAY,
            border: COLOR_STROKE,
        }
    }
}
