use thiserror::Error;

/// Failures that can surface from a single detector tick.
///
/// Every variant leaves the session state exactly as it was before the
/// failing tick; a bad frame is reported to the caller, never folded into
/// the state.
#[derive(Debug, Error)]
pub enum WaveError {
    /// The input bytes could not be decoded into a raster image.
    #[error("invalid frame: {0}")]
    InvalidFrame(#[from] image::ImageError),

    /// Two frames that must share dimensions did not.
    #[error(
        "dimension mismatch: current frame is {current_width}x{current_height}, previous frame is {previous_width}x{previous_height}"
    )]
    DimensionMismatch {
        current_width: u32,
        current_height: u32,
        previous_width: u32,
        previous_height: u32,
    },
}
