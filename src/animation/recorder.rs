//! Animation recorder for writing rendered frames to a GIF file.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use gif::{Encoder, Frame, Repeat};

use super::AnimationError;
use crate::compute::RenderedFrame;
use crate::schema::AnimationConfig;

/// Animation recorder that appends frames to a GIF file.
///
/// Usage:
/// ```ignore
/// let mut recorder = AnimationRecorder::create("output.gif", &config)?;
/// for frame in renderer.frames() {
///     recorder.record_frame(&frame?)?;
/// }
/// let stats = recorder.finalize()?;
/// ```
pub struct AnimationRecorder {
    encoder: Encoder<BufWriter<File>>,
    path: PathBuf,
    config: AnimationConfig,
    frames_written: u64,
}

impl AnimationRecorder {
    /// Create the output file and write the GIF preamble.
    pub fn create<P: AsRef<Path>>(path: P, config: &AnimationConfig) -> Result<Self, AnimationError> {
        if config.fps == 0 {
            return Err(AnimationError::InvalidFrameRate);
        }
        if !(1..=30).contains(&config.encoder_speed) {
            return Err(AnimationError::InvalidEncoderSpeed(config.encoder_speed));
        }
        let (width, height) = match (
            u16::try_from(config.image_width),
            u16::try_from(config.image_height),
        ) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
            _ => {
                return Err(AnimationError::InvalidDimensions {
                    width: config.image_width,
                    height: config.image_height,
                });
            }
        };

        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        let mut encoder = Encoder::new(BufWriter::new(file), width, height, &[])?;

        // Without the loop extension a GIF plays once.
        if config.looping {
            encoder.set_repeat(Repeat::Infinite)?;
        }

        log::info!("Recording animation to {}", path.display());

        Ok(Self {
            encoder,
            path,
            config: config.clone(),
            frames_written: 0,
        })
    }

    /// Append one frame with the configured frame delay.
    pub fn record_frame(&mut self, frame: &RenderedFrame) -> Result<(), AnimationError> {
        let expected = (self.config.image_width, self.config.image_height);
        let found = frame.image.dimensions();
        if expected != found {
            return Err(AnimationError::FrameSizeMismatch { expected, found });
        }

        // Dimensions were range-checked in `create`.
        let (width, height) = (found.0 as u16, found.1 as u16);
        let mut pixels = frame.image.as_raw().clone();
        let mut gif_frame =
            Frame::from_rgba_speed(width, height, &mut pixels, self.config.encoder_speed);
        // GIF delays are in centiseconds.
        gif_frame.delay = (self.config.frame_delay_ms() / 10).min(u16::MAX as u32) as u16;

        self.encoder.write_frame(&gif_frame)?;
        self.frames_written += 1;

        log::debug!("Encoded frame {} (#{})", frame.index, self.frames_written);
        Ok(())
    }

    /// Get number of frames recorded so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Output file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the trailer, flush and sync the file.
    ///
    /// A recording with no frames is rejected and its file removed.
    pub fn finalize(self) -> Result<AnimationStats, AnimationError> {
        let Self {
            encoder,
            path,
            config,
            frames_written,
        } = self;

        if frames_written == 0 {
            drop(encoder);
            if let Err(e) = fs::remove_file(&path) {
                log::warn!("Could not remove empty {}: {}", path.display(), e);
            }
            return Err(AnimationError::NoFrames);
        }

        let mut writer = encoder.into_inner()?;
        writer.flush()?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;

        let total_bytes = fs::metadata(&path)?.len();
        let stats = AnimationStats {
            frame_count: frames_written,
            total_bytes,
            fps: config.fps,
            looping: config.looping,
        };
        log::info!("Finished {}: {}", path.display(), stats);
        Ok(stats)
    }
}

/// Statistics from a recording session.
#[derive(Debug, Clone)]
pub struct AnimationStats {
    /// Total frames recorded.
    pub frame_count: u64,
    /// Total file size in bytes.
    pub total_bytes: u64,
    /// Playback rate.
    pub fps: u32,
    /// Whether the animation loops forever.
    pub looping: bool,
}

impl std::fmt::Display for AnimationStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} frames at {} fps, {} bytes{}",
            self.frame_count,
            self.fps,
            self.total_bytes,
            if self.looping { ", looping" } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::{ColorArray, FrameRenderer};
    use crate::schema::{Rgba, SceneConfig};
    use image::RgbaImage;
    use tempfile::tempdir;

    fn test_config() -> AnimationConfig {
        AnimationConfig {
            image_width: 64,
            image_height: 48,
            encoder_speed: 30,
            ..Default::default()
        }
    }

    fn solid_frame(index: usize, width: u32, height: u32, shade: u8) -> RenderedFrame {
        RenderedFrame {
            index,
            z: 0,
            colors: ColorArray::uniform(1, 1, 1, Rgba::WHITE),
            image: RgbaImage::from_pixel(width, height, image::Rgba([shade, shade, 255, 255])),
        }
    }

    #[test]
    fn test_recorder_basic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.gif");
        let config = test_config();

        let mut recorder = AnimationRecorder::create(&path, &config).unwrap();
        for i in 0..3 {
            recorder.record_frame(&solid_frame(i, 64, 48, (i * 60) as u8)).unwrap();
        }
        assert_eq!(recorder.frames_written(), 3);

        let stats = recorder.finalize().unwrap();
        assert_eq!(stats.frame_count, 3);
        assert_eq!(stats.fps, 5);
        assert!(stats.looping);
        assert!(stats.total_bytes > 0);
        assert_eq!(fs::metadata(&path).unwrap().len(), stats.total_bytes);

        let header = fs::read(&path).unwrap();
        assert_eq!(&header[..6], b"GIF89a");
    }

    #[test]
    fn test_recorder_rejects_wrong_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("size.gif");

        let mut recorder = AnimationRecorder::create(&path, &test_config()).unwrap();
        let err = recorder.record_frame(&solid_frame(0, 32, 32, 0)).unwrap_err();
        assert!(matches!(
            err,
            AnimationError::FrameSizeMismatch {
                expected: (64, 48),
                found: (32, 32)
            }
        ));
        assert_eq!(recorder.frames_written(), 0);
    }

    #[test]
    fn test_recorder_zero_fps() {
        let dir = tempdir().unwrap();
        let config = AnimationConfig {
            fps: 0,
            ..test_config()
        };
        assert!(matches!(
            AnimationRecorder::create(dir.path().join("x.gif"), &config),
            Err(AnimationError::InvalidFrameRate)
        ));
    }

    #[test]
    fn test_recorder_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.gif");
        assert!(matches!(
            AnimationRecorder::create(&path, &test_config()),
            Err(AnimationError::Io(_))
        ));
    }

    #[test]
    fn test_recorder_rendered_frames() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rendered.gif");

        let config = AnimationConfig {
            image_width: 240,
            image_height: 160,
            encoder_speed: 30,
            ..Default::default()
        };
        let renderer = FrameRenderer::new(SceneConfig::default(), config.clone()).unwrap();

        let mut recorder = AnimationRecorder::create(&path, &config).unwrap();
        for frame in renderer.frames() {
            recorder.record_frame(&frame.unwrap()).unwrap();
        }
        let stats = recorder.finalize().unwrap();

        assert_eq!(stats.frame_count, 9);
        assert!(path.exists());
    }

    #[test]
    fn test_recorder_rejects_empty_recording() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.gif");

        let recorder = AnimationRecorder::create(&path, &test_config()).unwrap();
        assert!(matches!(recorder.finalize(), Err(AnimationError::NoFrames)));
        assert!(!path.exists());
    }

    #[test]
    fn test_recorder_rejects_oversized_image() {
        let dir = tempdir().unwrap();
        let config = AnimationConfig {
            image_width: 70_000,
            ..test_config()
        };
        assert!(matches!(
            AnimationRecorder::create(dir.path().join("big.gif"), &config),
            Err(AnimationError::InvalidDimensions {
                width: 70_000,
                height: 48
            })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_finalize_reports_write_failure() {
        let full = Path::new("/dev/full");
        if !full.exists() {
            return;
        }
        let config = AnimationConfig {
            image_width: 8,
            image_height: 8,
            ..test_config()
        };

        let mut recorder = AnimationRecorder::create(full, &config).unwrap();
        recorder.record_frame(&solid_frame(0, 8, 8, 0)).unwrap();
        let result = recorder.finalize();
        assert!(
            matches!(result, Err(AnimationError::Io(_) | AnimationError::Encoding(_))),
            "got {:?}",
            result
        );
    }
}
