//! Compute module - Grid state, projection and rasterization of frames.

mod camera;
mod frame;
mod grid;
mod raster;
mod renderer;

pub use camera::*;
pub use frame::*;
pub use grid::*;
pub use raster::*;
pub use renderer::*;
