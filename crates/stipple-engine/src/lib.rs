//! Stipple engine crate.
//!
//! Platform and GPU plumbing for the point canvas: window runtime, input
//! translation, shader program construction, vertex layout and storage, and a
//! point-list renderer.

pub mod coords;
pub mod core;
pub mod device;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod render;
pub mod shader;
pub mod window;

pub use error::{GeometryError, ShaderError, Stage};
