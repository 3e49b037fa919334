//! Core engine-facing contracts.
//!
//! The interface between the runtime (platform loop) and the application: the
//! `App` callbacks, the context they receive, and the window lifecycle.

mod app;
mod ctx;
mod lifecycle;

pub use app::{App, AppControl};
pub use ctx::{EventCtx, WindowCtx};
pub use lifecycle::{Lifecycle, Phase};
