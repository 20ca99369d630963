//! Reliability Cube - Animated voxel diagram for reliability analysis.
//!
//! Renders a 5x5x5 voxel cube whose axes are labelled with component
//! functions, failure modes and corrective actions. A single highlighted
//! cell rises and falls through one column, and the frames are written
//! out as a looping GIF.
//!
//! # Architecture
//!
//! The crate is split into four modules:
//!
//! - `schema`: Scene and animation configuration
//! - `compute`: Frame state, projection and rasterization
//! - `animation`: GIF recording and read-back
//! - `preview`: Optional hand-off to the platform viewer
//!
//! # Example
//!
//! ```rust,no_run
//! use reliability_cube::{
//!     animation::{AnimationRecorder, resolve_output_path},
//!     compute::FrameRenderer,
//!     schema::{AnimationConfig, SceneConfig},
//! };
//!
//! let animation = AnimationConfig::default();
//! let renderer = FrameRenderer::new(SceneConfig::default(), animation.clone()).unwrap();
//!
//! let path = resolve_output_path("cube");
//! let mut recorder = AnimationRecorder::create(&path, &animation).unwrap();
//! for frame in renderer.frames() {
//!     recorder.record_frame(&frame.unwrap()).unwrap();
//! }
//! println!("{}", recorder.finalize().unwrap());
//! ```

pub mod animation;
pub mod compute;
pub mod preview;
pub mod schema;

// Re-export commonly used types
pub use animation::{AnimationPlayer, AnimationRecorder, AnimationStats};
pub use compute::{FrameRenderer, RenderedFrame};
pub use schema::{AnimationConfig, PresentationConfig, Rgba, SceneConfig};
