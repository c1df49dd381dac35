//! HSV view of an 8-bit color.

use super::rgb::Rgb;

/// Hue in degrees `[0, 360)`, saturation and value in percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl From<Rgb> for Hsv {
    fn from(c: Rgb) -> Self {
        let r = c.r as f32 / 255.0;
        let g = c.g as f32 / 255.0;
        let b = c.b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let d = max - min;

        let mut h = 0.0;
        if d != 0.0 {
            h = if max == r {
                ((g - b) / d) % 6.0
            } else if max == g {
                (b - r) / d + 2.0
            } else {
                (r - g) / d + 4.0
            };
            h *= 60.0;
            if h < 0.0 {
                h += 360.0;
            }
        }

        let s = if max == 0.0 { 0.0 } else { d / max * 100.0 };

        Self { h, s, v: max * 100.0 }
    }
}
