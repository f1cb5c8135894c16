//! Palette struct with nearest-color matching.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use crate::api::RenderError;

/// One of the seven inks the panel can physically render.
///
/// Declaration order is the palette order used throughout the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelColor {
    Black,
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    White,
}

impl PanelColor {
    /// Every panel color, in palette order.
    pub const ALL: [PanelColor; 7] = [
        PanelColor::Black,
        PanelColor::Red,
        PanelColor::Green,
        PanelColor::Blue,
        PanelColor::Yellow,
        PanelColor::Orange,
        PanelColor::White,
    ];

    /// The sRGB value this ink is specified as.
    #[inline]
    pub const fn rgb(self) -> [u8; 3] {
        match self {
            PanelColor::Black => [0, 0, 0],
            PanelColor::Red => [255, 0, 0],
            PanelColor::Green => [0, 255, 0],
            PanelColor::Blue => [0, 0, 255],
            PanelColor::Yellow => [255, 255, 0],
            PanelColor::Orange => [255, 128, 0],
            PanelColor::White => [255, 255, 255],
        }
    }

    /// Look up the panel color with exactly this sRGB value.
    pub fn from_rgb(rgb: [u8; 3]) -> Option<Self> {
        PanelColor::ALL.into_iter().find(|c| c.rgb() == rgb)
    }

    /// Lowercase name, as used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            PanelColor::Black => "black",
            PanelColor::Red => "red",
            PanelColor::Green => "green",
            PanelColor::Blue => "blue",
            PanelColor::Yellow => "yellow",
            PanelColor::Orange => "orange",
            PanelColor::White => "white",
        }
    }
}

impl fmt::Display for PanelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered, duplicate-free set of panel colors.
///
/// Matching is plain squared Euclidean distance on 8-bit sRGB values, with
/// ties going to the earliest entry. The panel inks are fully saturated
/// primaries and secondaries, so a perceptual metric buys little here and
/// would drift from how the panel output has been tuned.
///
/// # Example
///
/// ```
/// use eink_render::{PanelColor, Palette};
///
/// let palette = Palette::SEVEN_COLOR;
/// assert_eq!(palette.len(), 7);
/// assert_eq!(palette.find_nearest([250.0, 10.0, 5.0]), PanelColor::Red);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Cow<'static, [PanelColor]>,
}

impl Palette {
    /// The full seven-ink palette of the panel.
    pub const SEVEN_COLOR: Palette = Palette {
        colors: Cow::Borrowed(&PanelColor::ALL),
    };

    /// Build a palette from a subset of panel colors.
    ///
    /// # Errors
    ///
    /// - [`RenderError::EmptyPalette`] if `colors` is empty
    /// - [`RenderError::DuplicateColor`] if a color appears twice
    pub fn new(colors: &[PanelColor]) -> Result<Self, RenderError> {
        if colors.is_empty() {
            return Err(RenderError::EmptyPalette);
        }

        let mut seen = HashSet::new();
        for (index, color) in colors.iter().enumerate() {
            if !seen.insert(*color) {
                return Err(RenderError::DuplicateColor { index });
            }
        }

        Ok(Self {
            colors: Cow::Owned(colors.to_vec()),
        })
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The palette entries in order.
    #[inline]
    pub fn colors(&self) -> &[PanelColor] {
        &self.colors
    }

    /// Whether `color` is one of this palette's entries.
    #[inline]
    pub fn contains(&self, color: PanelColor) -> bool {
        self.colors.contains(&color)
    }

    /// Find the palette entry closest to an sRGB value.
    ///
    /// `rgb` is in 8-bit units but may carry fractional diffused error.
    #[inline]
    pub fn find_nearest(&self, rgb: [f32; 3]) -> PanelColor {
        let mut best = self.colors[0];
        let mut best_dist = f32::MAX;

        for &color in self.colors.iter() {
            let [r, g, b] = color.rgb();
            let dr = rgb[0] - r as f32;
            let dg = rgb[1] - g as f32;
            let db = rgb[2] - b as f32;
            let dist = dr * dr + dg * dg + db * db;
            if dist < best_dist {
                best_dist = dist;
                best = color;
            }
        }

        best
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::SEVEN_COLOR
    }
}
