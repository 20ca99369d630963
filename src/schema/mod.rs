//! Schema module - Configuration types for the reliability cube scene.

mod color;
mod config;

pub use color::*;
pub use config::*;
