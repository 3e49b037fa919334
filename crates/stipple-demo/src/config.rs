use std::path::{Path, PathBuf};

use stipple_engine::shader::ShaderPaths;
use stipple_engine::window::RuntimeConfig;
use winit::dpi::LogicalSize;

/// Name of the position input in the vertex stage.
pub const POSITION_ATTRIBUTE: &str = "a_position";

/// Settings for the point canvas.
#[derive(Debug, Clone)]
pub struct CanvasConfig {
    pub window: RuntimeConfig,
    pub shaders: ShaderPaths,
    pub clear_color: wgpu::Color,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            window: RuntimeConfig {
                title: "stipple".to_string(),
                initial_size: LogicalSize::new(800.0, 600.0),
            },
            shaders: ShaderPaths::in_dir(shader_dir()),
            clear_color: wgpu::Color::BLACK,
        }
    }
}

/// `./shaders` when run from a directory that has one, else the crate's own.
fn shader_dir() -> PathBuf {
    let local = Path::new("shaders");
    if local.join("vertex.wgsl").is_file() {
        return local.to_path_buf();
    }
    Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders")
}
