// THEORY:
// The `ColorKey` module turns a raw 16-bit RGBA sample into the canonical identity
// a color is counted under. Two pixels share a key exactly when their truncated
// RGB bytes agree; alpha never takes part.
//
// Key architectural principles:
// 1.  **Truncation, not Rounding**: Each channel keeps its most-significant 8 bits
//     (`channel >> 8`). Because 8-bit sources are widened by `v * 257`, this returns
//     the original byte unchanged for every 8-bit image.
// 2.  **Packed Representation**: The key is stored as `0xRRGGBB` in a `u32`. Hashing
//     and comparison are integer operations; the hex text only exists when a key
//     is displayed.
// 3.  **Ordering Matches the Text**: Ordering by packed value is the same as ordering
//     the fixed-width uppercase hex strings, so a report sorted on keys reads in
//     lexicographic order.

use std::fmt;
use std::str::FromStr;

use crate::core_modules::pixel_grid::{Rgba16, Sample};
use crate::error::ParseColorKeyError;

pub type Packed = u32;

const HEX_DIGITS: usize = 6;

/// Canonical RGB identity of a pixel, alpha excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorKey(Packed);

impl ColorKey {
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        ColorKey(((red as Packed) << 16) | ((green as Packed) << 8) | blue as Packed)
    }

    /// The `0xRRGGBB` value of this key.
    pub fn packed(&self) -> Packed {
        self.0
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }
}

/// Truncates each color channel to its top 8 bits and packs them R-G-B.
/// Alpha is accepted so callers can pass a whole sample, but it is ignored.
pub fn normalize(red: Sample, green: Sample, blue: Sample, _alpha: Sample) -> ColorKey {
    ColorKey::from_rgb8((red >> 8) as u8, (green >> 8) as u8, (blue >> 8) as u8)
}

impl From<Rgba16> for ColorKey {
    fn from(sample: Rgba16) -> Self {
        normalize(sample.red, sample.green, sample.blue, sample.alpha)
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (red, green, blue) = self.rgb();
        write!(f, "{red:02X}{green:02X}{blue:02X}")
    }
}

impl FromStr for ColorKey {
    type Err = ParseColorKeyError;

    /// Accepts exactly six hex digits, in either case.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.len() != HEX_DIGITS {
            return Err(ParseColorKeyError::Length(text.len()));
        }
        if let Some(bad) = text.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseColorKeyError::Digit(bad));
        }
        Packed::from_str_radix(text, 16)
            .map(ColorKey)
            .map_err(|_| ParseColorKeyError::Length(text.len()))
    }
}
