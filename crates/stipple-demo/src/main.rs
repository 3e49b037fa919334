mod app;
mod canvas;
mod config;

use stipple_engine::device::GpuInit;
use stipple_engine::logging::{init_logging, LoggingConfig};
use stipple_engine::window::Runtime;

use crate::app::PointCanvasApp;
use crate::config::CanvasConfig;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = CanvasConfig::default();
    let window = config.window.clone();

    log::info!("left-click to place points; close the window to quit");

    Runtime::run(window, GpuInit::default(), PointCanvasApp::new(config))
}
