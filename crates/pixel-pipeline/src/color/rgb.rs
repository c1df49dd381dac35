//! 8-bit RGB and RGBA color values.

use std::str::FromStr;

use crate::palette::ParseColorError;

/// An opaque 8-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Read a color from the first three bytes of a pixel slice.
    ///
    /// Any fourth (alpha) byte is ignored.
    #[inline]
    pub fn from_slice(px: &[u8]) -> Self {
        Self::new(px[0], px[1], px[2])
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Squared Euclidean distance in RGB space.
    ///
    /// The square root is never taken: ranking by squared distance gives the
    /// same order and stays in integer arithmetic.
    ///
    /// # Example
    /// ```
    /// use pixel_pipeline::Rgb;
    /// let d = Rgb::new(0, 0, 0).distance_squared(Rgb::new(1, 2, 3));
    /// assert_eq!(d, 14);
    /// ```
    #[inline]
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB` (case-insensitive,
    /// surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = hex_digits(s)?;
        match digits.len() {
            3 | 6 => Ok(Self::new(digits[0], digits[1], digits[2])),
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

/// An 8-bit color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black, the default square-padding fill.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

impl From<Rgb> for Rgba {
    fn from(c: Rgb) -> Self {
        Self::new(c.r, c.g, c.b, 255)
    }
}

impl FromStr for Rgba {
    type Err = ParseColorError;

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (hash optional).
    /// Forms without alpha are opaque.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = hex_digits(s)?;
        match digits.len() {
            3 | 6 => Ok(Self::new(digits[0], digits[1], digits[2], 255)),
            4 | 8 => Ok(Self::new(digits[0], digits[1], digits[2], digits[3])),
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

/// Decode a hex color string into channel bytes.
///
/// Shorthand forms (3 or 4 digits) expand each digit by 17 (`F` -> `FF`).
/// Returns an empty vector for unsupported lengths so callers can decide
/// which lengths they accept.
fn hex_digits(s: &str) -> Result<Vec<u8>, ParseColorError> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err(ParseColorError::InvalidLength);
    }

    let (width, scale) = match s.len() {
        3 | 4 => (1, 17),
        6 | 8 => (2, 1),
        _ => return Ok(Vec::new()),
    };

    let mut digits = Vec::with_capacity(s.len() / width);
    for i in (0..s.len()).step_by(width) {
        digits.push(u8::from_str_radix(&s[i..i + width], 16)? * scale);
    }
    Ok(digits)
}
