// Test fixtures: encodes small images in memory so decoder and pipeline tests
// exercise the real codecs without checked-in binary files.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

/// Encodes an RGBA8 buffer (`width * height * 4` bytes) in `format`.
/// JPEG has no alpha channel, so alpha is dropped for it.
pub fn encode(format: ImageFormat, width: u32, height: u32, buffer: &[u8]) -> Vec<u8> {
    let image = RgbaImage::from_raw(width, height, buffer.to_vec())
        .expect("buffer length must be width * height * 4");
    let image = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image).to_rgb8()),
        _ => DynamicImage::ImageRgba8(image),
    };

    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, format)
        .expect("Error Encoding Fixture.");
    bytes.into_inner()
}

/// A `width` x `height` image filled with one RGBA color.
pub fn solid(format: ImageFormat, width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba(rgba));
    encode(format, width, height, image.as_raw())
}

/// A `width` x `height` RGBA8 buffer whose pixel `i` (row-major) is `colors[i % colors.len()]`.
pub fn cycling_buffer(width: u32, height: u32, colors: &[[u8; 4]]) -> Vec<u8> {
    let pixels = (width * height) as usize;
    let mut buffer = Vec::with_capacity(pixels * 4);
    for i in 0..pixels {
        buffer.extend_from_slice(&colors[i % colors.len()]);
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_fixtures_start_with_their_magic() {
        let png = solid(ImageFormat::Png, 2, 2, [255, 255, 255, 255]);
        let gif = solid(ImageFormat::Gif, 2, 2, [255, 255, 255, 255]);
        let jpeg = solid(ImageFormat::Jpeg, 2, 2, [255, 255, 255, 255]);
        assert!(png.starts_with(b"\x89PNG"));
        assert!(gif.starts_with(b"GIF8"));
        assert!(jpeg.starts_with(b"\xFF\xD8"));
    }

    #[test]
    fn cycling_buffer_repeats_colors() {
        let buffer = cycling_buffer(3, 1, &[[1, 2, 3, 4], [5, 6, 7, 8]]);
        assert_eq!(buffer, vec![1, 2, 3, 4, 5, 6, 7, 8, 1, 2, 3, 4]);
    }
}
