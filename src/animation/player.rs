//! Animation player for reading back recorded GIF files.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, Frame, ImageDecoder, RgbaImage};

use super::{AnimationError, netscape_loop_count};

/// Decoded animation held in memory.
///
/// Usage:
/// ```ignore
/// let player = AnimationPlayer::open("animation.gif")?;
/// println!("Animation has {} frames at {} fps", player.frame_count(), player.frame_rate());
///
/// for image in player.frames() {
///     // Use image...
/// }
/// ```
pub struct AnimationPlayer {
    frames: Vec<Frame>,
    width: u32,
    height: u32,
    loop_count: Option<u16>,
}

impl AnimationPlayer {
    /// Open and fully decode an animation file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AnimationError> {
        let bytes = fs::read(path)?;
        let loop_count = netscape_loop_count(&bytes);

        let decoder = GifDecoder::new(Cursor::new(bytes))?;
        let (width, height) = decoder.dimensions();
        let frames = decoder.into_frames().collect_frames()?;

        Ok(Self {
            frames,
            width,
            height,
            loop_count,
        })
    }

    /// Get total number of frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Logical screen size.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Per-frame delays in whole milliseconds.
    pub fn delays_ms(&self) -> Vec<u32> {
        self.frames
            .iter()
            .map(|f| {
                let (numer, denom) = f.delay().numer_denom_ms();
                (numer as f32 / denom.max(1) as f32).round() as u32
            })
            .collect()
    }

    /// Frame rate implied by the average frame delay.
    pub fn frame_rate(&self) -> f32 {
        let delays = self.delays_ms();
        let total: u32 = delays.iter().sum();
        if delays.is_empty() || total == 0 {
            return 0.0;
        }
        1000.0 * delays.len() as f32 / total as f32
    }

    /// Raw loop count from the file, if present (0 = forever).
    pub fn loop_count(&self) -> Option<u16> {
        self.loop_count
    }

    /// Check if the animation loops forever.
    pub fn loops_forever(&self) -> bool {
        self.loop_count == Some(0)
    }

    /// Read a specific frame by index.
    pub fn frame(&self, index: usize) -> Result<&RgbaImage, AnimationError> {
        self.frames
            .get(index)
            .map(|f| f.buffer())
            .ok_or(AnimationError::FrameOutOfRange {
                index,
                count: self.frames.len(),
            })
    }

    /// Iterate over all frame images in order.
    pub fn frames(&self) -> impl ExactSizeIterator<Item = &RgbaImage> + '_ {
        self.frames.iter().map(|f| f.buffer())
    }
}
