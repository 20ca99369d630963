//! Animation recording and playback for rendered frame sequences.
//!
//! Frames are written as an animated GIF:
//!
//! ```text
//! Header: "GIF89a" + logical screen descriptor
//! NETSCAPE2.0 application extension (loop count 0 = forever), if looping
//! Per frame:
//!   Graphic control extension (delay in centiseconds)
//!   Image descriptor + local color table + LZW image data
//! Trailer: 0x3B
//! ```
//!
//! Encoding is done in-process, so no external tool is required.

mod format;
mod player;
mod recorder;

pub use format::{
    EXTERNAL_ENCODER, GIF_EXTENSION, NETSCAPE_APP_ID, detect_external_encoder, find_in_path,
    netscape_loop_count, resolve_output_path,
};
pub use player::AnimationPlayer;
pub use recorder::{AnimationRecorder, AnimationStats};

/// Error type for animation file operations.
#[derive(Debug, thiserror::Error)]
pub enum AnimationError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("GIF encoding error: {0}")]
    Encoding(#[from] gif::EncodingError),

    #[error("Frame is {found:?} pixels but the animation is {expected:?}")]
    FrameSizeMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },

    #[error("Frame index {index} out of range (frame count {count})")]
    FrameOutOfRange { index: usize, count: usize },

    #[error("Frame rate must be positive")]
    InvalidFrameRate,

    #[error("Encoder speed {0} outside 1..=30")]
    InvalidEncoderSpeed(i32),

    #[error("Image size {width}x{height} cannot be stored in a GIF")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("No frames were recorded")]
    NoFrames,
}
