// Synthetic frame builders shared by the detector tests.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};

pub(crate) fn png_bytes(image: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )
        .expect("png encoding failed");
    bytes
}

/// A frame of one uniform gray level, encoded as PNG bytes.
pub(crate) fn solid_frame(width: u32, height: u32, level: u8) -> Vec<u8> {
    png_bytes(&RgbImage::from_pixel(width, height, Rgb([level, level, level])))
}

/// A black frame with one white square, encoded as PNG bytes. Moving the
/// square between frames is the tests' stand-in for a waving hand.
pub(crate) fn square_frame(width: u32, height: u32, x0: u32, y0: u32, side: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| {
        if x >= x0 && x < x0 + side && y >= y0 && y < y0 + side {
            Rgb([255, 255, 255])
        } else {
            Rgb([0, 0, 0])
        }
    });
    png_bytes(&image)
}
