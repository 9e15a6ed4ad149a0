// THEORY:
// The `frame` module defines the two image buffers the rest of the detector
// speaks in terms of. `Frame` is the raw, decoded color image exactly as the
// camera delivered it; `GrayFrame` is the single-channel intensity image the
// preprocessor derives from it. Both are "dumb" data containers: they hold
// tightly packed, row-major pixel data plus dimensions, and know nothing
// about motion, scoring, or session state.
//
// Key architectural principles:
// 1.  **Decode at the boundary**: `Frame::from_bytes` is the only place where
//     untrusted camera bytes become pixels. Anything that fails to decode is
//     rejected right here as `WaveError::InvalidFrame`, before any analysis
//     state can be touched.
// 2.  **Owned pixels**: frames own their buffers outright, so the session
//     state can carry the previous `GrayFrame` across ticks without lifetime
//     gymnastics.

use crate::error::WaveError;

/// A decoded 3-channel color frame, tightly packed RGB8, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Raw RGB8 pixel data.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Frame {
    /// Creates a frame from raw RGB8 data.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width * height * 3) as usize,
            "RGB8 data size mismatch"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// Decodes a frame from an in-memory byte buffer (JPEG, PNG, and the
    /// other formats the `image` crate recognizes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WaveError> {
        let decoded = image::load_from_memory(bytes)?;
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        Ok(Self {
            data: rgb.into_raw(),
            width,
            height,
        })
    }
}

/// A single-channel intensity image, one byte per pixel, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct GrayFrame {
    /// Raw intensity data.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl GrayFrame {
    /// Creates a grayscale frame from raw intensity data.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width * height) as usize,
            "intensity data size mismatch"
        );
        Self {
            data,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::test_frames::{png_bytes, solid_frame};
    use image::{Rgb, RgbImage};

    #[test]
    fn test_frame_decodes_png_bytes() {
        let bytes = png_bytes(&RgbImage::from_pixel(2, 2, Rgb([255, 0, 0])));
        let frame = Frame::from_bytes(&bytes).expect("png should decode");
        assert_eq!(frame.width, 2);
        assert_eq!(frame.height, 2);
        assert_eq!(&frame.data[0..3], &[255, 0, 0]);
        assert_eq!(frame.data.len(), 2 * 2 * 3);
    }

    #[test]
    fn test_frame_rejects_garbage_bytes() {
        let result = Frame::from_bytes(b"definitely not an image");
        assert!(
            matches!(result, Err(WaveError::InvalidFrame(_))),
            "garbage bytes must decode to InvalidFrame, got {result:?}"
        );
    }

    #[test]
    fn test_solid_fixture_round_trips() {
        let bytes = solid_frame(8, 4, 128);
        let frame = Frame::from_bytes(&bytes).expect("fixture should decode");
        assert_eq!(frame.width, 8);
        assert_eq!(frame.height, 4);
        assert!(frame.data.iter().all(|&channel| channel == 128));
    }

    #[test]
    fn test_gray_frame_creation() {
        let gray = GrayFrame::new(vec![7u8; 12], 4, 3);
        assert_eq!(gray.width, 4);
        assert_eq!(gray.height, 3);
        assert_eq!(gray.data.len(), 12);
    }
}
