// THEORY:
// The `PixelGrid` module is the read-only view every later stage works against.
// A decoded image is reduced to two capabilities: its bounds and a per-coordinate
// color lookup. Nothing downstream needs to know which codec produced the pixels
// or what bit depth the source file used.
//
// Key architectural principles:
// 1.  **Half-Open Bounds**: Valid coordinates satisfy `min <= coord < max` on both
//     axes. The minimum corner is not assumed to be the origin, so a grid can
//     describe a sub-rectangle of a larger canvas.
// 2.  **Uniform Sample Depth**: Every sample is reported as four 16-bit channels
//     (0..=65535). An 8-bit source value `v` is widened to `v * 257`, which keeps
//     the original byte in the most-significant 8 bits.
// 3.  **Trait at the Seam**: `PixelGrid` is a trait so the aggregator can be driven
//     by a decoded image in production and by small synthetic grids in tests.

use image::{ColorType, DynamicImage, ImageBuffer, Rgba};

pub type Sample = u16;
pub type Coordinate = i32;

/// A single color sample with four 16-bit channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgba16 {
    pub red: Sample,
    pub green: Sample,
    pub blue: Sample,
    pub alpha: Sample,
}

impl Rgba16 {
    pub fn new(red: Sample, green: Sample, blue: Sample, alpha: Sample) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Widens 8-bit channels to the 16-bit range (`v * 257`).
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        let widen = |v: u8| (v as Sample) * 257;
        Self::new(widen(red), widen(green), widen(blue), widen(alpha))
    }
}

impl From<Rgba<u16>> for Rgba16 {
    fn from(pixel: Rgba<u16>) -> Self {
        let [red, green, blue, alpha] = pixel.0;
        Self::new(red, green, blue, alpha)
    }
}

/// Half-open rectangle of valid pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: Coordinate,
    pub min_y: Coordinate,
    pub max_x: Coordinate,
    pub max_y: Coordinate,
}

impl Bounds {
    pub fn new(min_x: Coordinate, min_y: Coordinate, max_x: Coordinate, max_y: Coordinate) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounds anchored at the origin.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as Coordinate, height as Coordinate)
    }

    /// Horizontal extent. Degenerate bounds report zero.
    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x).max(0) as u32
    }

    /// Vertical extent. Degenerate bounds report zero.
    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y).max(0) as u32
    }

    /// Number of coordinates inside the bounds.
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    pub fn contains(&self, x: Coordinate, y: Coordinate) -> bool {
        self.min_x <= x && x < self.max_x && self.min_y <= y && y < self.max_y
    }
}

/// An immutable, decoded image exposing its bounds and per-coordinate color.
pub trait PixelGrid {
    fn bounds(&self) -> Bounds;

    /// Color at `(x, y)`. Coordinates outside `bounds()` yield transparent black.
    fn color_at(&self, x: Coordinate, y: Coordinate) -> Rgba16;
}

/// The production grid: a decoded image held as 16-bit RGBA.
pub struct DecodedGrid {
    buffer: ImageBuffer<Rgba<u16>, Vec<u16>>,
    source_color: ColorType,
}

impl DecodedGrid {
    pub fn new(image: DynamicImage) -> Self {
        let source_color = image.color();
        Self {
            buffer: image.to_rgba16(),
            source_color,
        }
    }

    /// The color layout of the file before widening to 16-bit RGBA.
    pub fn source_color(&self) -> ColorType {
        self.source_color
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }
}

impl PixelGrid for DecodedGrid {
    fn bounds(&self) -> Bounds {
        Bounds::from_size(self.buffer.width(), self.buffer.height())
    }

    fn color_at(&self, x: Coordinate, y: Coordinate) -> Rgba16 {
        if x < 0 || y < 0 {
            return Rgba16::default();
        }
        self.buffer
            .get_pixel_checked(x as u32, y as u32)
            .map(|pixel| Rgba16::from(*pixel))
            .unwrap_or_default()
    }
}

impl From<DynamicImage> for DecodedGrid {
    fn from(image: DynamicImage) -> Self {
        DecodedGrid::new(image)
    }
}
