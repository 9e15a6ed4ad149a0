// THEORY:
// The `preprocessor` module normalizes a raw color frame into the signal the
// rest of the detector consumes: a grayscale image with high-frequency noise
// smoothed away. Camera sensors and JPEG compression both produce small
// per-pixel fluctuations between consecutive frames of a perfectly static
// scene; left in place, those fluctuations would register as motion
// everywhere. Averaging each pixel over a wide window cancels them while
// leaving real, large-scale movement intact, which is exactly the trade the
// differencing stage wants.

use crate::core_modules::frame::{Frame, GrayFrame};

/// Converts a color frame to grayscale and smooths it with a symmetric
/// `blur_kernel` x `blur_kernel` averaging window.
pub fn preprocess(frame: &Frame, blur_kernel: u32) -> GrayFrame {
    let gray = to_grayscale(frame);
    box_blur(&gray, blur_kernel)
}

/// Collapses RGB8 to single-channel intensity.
pub fn to_grayscale(frame: &Frame) -> GrayFrame {
    let mut gray = Vec::with_capacity((frame.width * frame.height) as usize);
    for px in frame.data.chunks_exact(3) {
        // ITU-R BT.601 luma coefficients
        let luma = (0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32) as u8;
        gray.push(luma);
    }
    GrayFrame::new(gray, frame.width, frame.height)
}

/// Smooths a grayscale image with a separable averaging window. The window
/// is clamped at the image borders and normalized by the pixels it actually
/// covers, so edge pixels stay as bright as the interior.
pub fn box_blur(src: &GrayFrame, kernel: u32) -> GrayFrame {
    let radius = (kernel / 2) as usize;
    if radius == 0 || src.data.is_empty() {
        return src.clone();
    }
    let width = src.width as usize;
    let height = src.height as usize;
    let rows = blur_rows(&src.data, width, height, radius);
    let blurred = blur_columns(&rows, width, height, radius);
    GrayFrame::new(blurred, src.width, src.height)
}

fn blur_rows(src: &[u8], width: usize, height: usize, radius: usize) -> Vec<u8> {
    let mut out = vec![0u8; src.len()];
    for y in 0..height {
        let row = &src[y * width..(y + 1) * width];
        for x in 0..width {
            let lo = x.saturating_sub(radius);
            let hi = (x + radius).min(width - 1);
            let mut sum = 0u32;
            for &value in &row[lo..=hi] {
                sum += value as u32;
            }
            out[y * width + x] = (sum / (hi - lo + 1) as u32) as u8;
        }
    }
    out
}

fn blur_columns(src: &[u8], width: usize, height: usize, radius: usize) -> Vec<u8> {
    let mut out = vec![0u8; src.len()];
    for x in 0..width {
        for y in 0..height {
            let lo = y.saturating_sub(radius);
            let hi = (y + radius).min(height - 1);
            let mut sum = 0u32;
            for row in lo..=hi {
                sum += src[row * width + x] as u32;
            }
            out[y * width + x] = (sum / (hi - lo + 1) as u32) as u8;
        }
    }
    out
}
