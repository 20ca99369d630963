//! Configuration types for the reliability cube scene and its animation.

use serde::{Deserialize, Serialize};

use super::Rgba;

/// Top-level scene configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Grid width in cells (X dimension).
    pub width: usize,
    /// Grid height in cells (Y dimension).
    pub height: usize,
    /// Grid depth in cells (Z dimension).
    pub depth: usize,
    /// Color every cell starts with.
    pub base_color: Rgba,
    /// Color of the moving marker cell.
    pub highlight_color: Rgba,
    /// Color of the cell borders.
    pub edge_color: Rgba,
    /// (x, y) column the marker travels along.
    pub highlight_column: (usize, usize),
    /// Labels, camera and framing.
    pub presentation: PresentationConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 5,
            height: 5,
            depth: 5,
            base_color: Rgba::new(0.5, 0.5, 1.0, 0.6),
            highlight_color: Rgba::new(1.0, 0.0, 0.0, 0.8),
            edge_color: Rgba::new(0.0, 0.0, 0.0, 0.5),
            highlight_column: (1, 3),
            presentation: PresentationConfig::default(),
        }
    }
}

/// Fixed presentation parameters: text, camera and box proportions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// Figure title drawn above the cube.
    pub title: String,
    /// Axis titles.
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub z_axis_label: String,
    /// One tick label per cell along each axis.
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
    pub z_labels: Vec<String>,
    /// Camera elevation in degrees above the XY plane.
    pub elevation: f32,
    /// Camera azimuth in degrees, measured from +X towards +Y.
    pub azimuth: f32,
    /// Extra compression applied to the Z axis.
    pub z_scale: f32,
    /// Relative box extents along X, Y and Z.
    pub box_aspect: [f32; 3],
    /// Figure background.
    pub background: Rgba,
    /// Color of all text.
    pub text_color: Rgba,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            title: "3D Reliability Analysis for Gamesa G114 Gearbox".into(),
            x_axis_label: "Main Function of the Component".into(),
            y_axis_label: "Failure Mode of the Component".into(),
            z_axis_label: "Intended Correction".into(),
            x_labels: labels(&[
                "Optimize Lubrication",
                "Protect Components",
                "Absorb Mechanical Loads",
                "Minimize Friction",
                "Support Shaft Rotation",
            ]),
            y_labels: labels(&[
                "Bearing Fatigue",
                "Corrosion",
                "Thermal Expansion",
                "Misalignment Issues",
                "Abrasion Wear",
            ]),
            z_labels: labels(&[
                "Enhance Alignment Precision",
                "Add Protective Coatings",
                "Increase Inspection Frequency",
                "Improve Material Quality",
                "Use High-Quality Bearings",
            ]),
            elevation: 25.0,
            azimuth: 135.0,
            z_scale: 0.7,
            box_aspect: [1.5, 1.5, 1.0],
            background: Rgba::WHITE,
            text_color: Rgba::BLACK,
        }
    }
}

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Output animation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Number of frames in one pass (rise then fall).
    pub frame_count: usize,
    /// Playback rate in frames per second.
    pub fps: u32,
    /// Loop the animation forever.
    pub looping: bool,
    /// Output image width in pixels.
    pub image_width: u32,
    /// Output image height in pixels.
    pub image_height: u32,
    /// GIF quantizer speed (1 = best quality, 30 = fastest).
    pub encoder_speed: i32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_count: 9,
            fps: 5,
            looping: true,
            image_width: 1200,
            image_height: 800,
            encoder_speed: 10,
        }
    }
}

impl AnimationConfig {
    /// Delay between frames in milliseconds.
    #[inline]
    pub fn frame_delay_ms(&self) -> u32 {
        1000 / self.fps.max(1)
    }

    /// Validate against the grid depth the marker travels through.
    pub fn validate(&self, depth: usize) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::InvalidFrameRate);
        }
        let max = max_frame_count(depth);
        if self.frame_count == 0 || self.frame_count > max {
            return Err(ConfigError::InvalidFrameCount {
                count: self.frame_count,
                max,
            });
        }
        if self.image_width == 0 || self.image_height == 0 {
            return Err(ConfigError::InvalidImageSize);
        }
        if !(1..=30).contains(&self.encoder_speed) {
            return Err(ConfigError::InvalidEncoderSpeed(self.encoder_speed));
        }
        Ok(())
    }
}

/// Longest sequence that rises through every layer and falls back to 0.
#[inline]
pub fn max_frame_count(depth: usize) -> usize {
    2 * depth.saturating_sub(1) + 1
}

impl SceneConfig {
    /// Total number of cells.
    #[inline]
    pub fn grid_size(&self) -> usize {
        self.width * self.height * self.depth
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 || self.depth == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        let (hx, hy) = self.highlight_column;
        if hx >= self.width || hy >= self.height {
            return Err(ConfigError::HighlightOutOfBounds { x: hx, y: hy });
        }
        for color in [self.base_color, self.highlight_color, self.edge_color] {
            if !color.is_normalized() {
                return Err(ConfigError::InvalidColor);
            }
        }

        let p = &self.presentation;
        let axes = [
            ('x', &p.x_labels, self.width),
            ('y', &p.y_labels, self.height),
            ('z', &p.z_labels, self.depth),
        ];
        for (axis, labels, expected) in axes {
            if labels.len() != expected {
                return Err(ConfigError::TickCountMismatch {
                    axis,
                    expected,
                    found: labels.len(),
                });
            }
        }
        if p.z_scale <= 0.0 || p.box_aspect.iter().any(|&a| a <= 0.0) {
            return Err(ConfigError::InvalidScale);
        }
        if !p.background.is_normalized() || !p.text_color.is_normalized() {
            return Err(ConfigError::InvalidColor);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid dimensions (width, height, depth) must be non-zero")]
    InvalidDimensions,
    #[error("Highlight column ({x}, {y}) lies outside the grid")]
    HighlightOutOfBounds { x: usize, y: usize },
    #[error("Colors must have channels in [0, 1]")]
    InvalidColor,
    #[error("Axis {axis} has {found} tick labels, expected {expected}")]
    TickCountMismatch {
        axis: char,
        expected: usize,
        found: usize,
    },
    #[error("Z scale and box aspect must be positive")]
    InvalidScale,
    #[error("Frame rate must be positive")]
    InvalidFrameRate,
    #[error("Frame count {count} must be between 1 and {max}")]
    InvalidFrameCount { count: usize, max: usize },
    #[error("Image dimensions must be non-zero")]
    InvalidImageSize,
    #[error("Encoder speed {0} must be between 1 and 30")]
    InvalidEncoderSpeed(i32),
}
