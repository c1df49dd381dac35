//! The fixed target palette and nearest-color matching.

use super::error::PaletteError;
use crate::color::Rgb;

/// An ordered, immutable list of target colors.
///
/// A palette is built once (usually at process start) and then shared
/// read-only between pipeline runs. Entry order matters: when several
/// entries are equally close to a pixel, the earliest one wins.
///
/// Duplicate entries are allowed. A later duplicate can never be selected,
/// because its earlier twin always ties with it.
///
/// # Example
///
/// ```
/// use pixel_pipeline::{Palette, Rgb};
///
/// let palette = Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.nearest(Rgb::new(200, 200, 200)), Rgb::new(255, 255, 255));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from a list of colors.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::EmptyPalette`] if `colors` is empty.
    pub fn new(colors: Vec<Rgb>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Create a palette from hex color strings such as `"#FF0000"` or `"#F00"`.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ParseColor`] naming the first invalid entry,
    /// or [`PaletteError::EmptyPalette`] if the list is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use pixel_pipeline::Palette;
    ///
    /// let palette = Palette::from_hex(&["#000000", "#FFF"]).unwrap();
    /// assert_eq!(palette.len(), 2);
    /// ```
    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self, PaletteError> {
        let colors = hex
            .iter()
            .enumerate()
            .map(|(index, s)| {
                s.as_ref()
                    .parse::<Rgb>()
                    .map_err(|source| PaletteError::ParseColor { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`: empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The palette entries in their fixed order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<Rgb> {
        self.colors.get(idx).copied()
    }

    /// Whether `color` is exactly one of the palette entries.
    pub fn contains(&self, color: Rgb) -> bool {
        self.colors.contains(&color)
    }

    /// Find the palette entry closest to `color` by squared RGB distance.
    ///
    /// Returns `(index, distance)`. Ties resolve to the lowest index: the
    /// scan only replaces the current best on a strictly smaller distance.
    #[inline]
    pub fn find_nearest(&self, color: Rgb) -> (usize, u32) {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;

        for (i, &entry) in self.colors.iter().enumerate() {
            let dist = color.distance_squared(entry);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
                if dist == 0 {
                    break;
                }
            }
        }

        (best_idx, best_dist)
    }

    /// The palette color closest to `color`.
    #[inline]
    pub fn nearest(&self, color: Rgb) -> Rgb {
        self.colors[self.find_nearest(color).0]
    }
}
