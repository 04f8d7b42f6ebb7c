//! Contract between the runtime loop and the application.
//!
//! The runtime owns the window and GPU state; apps only see `FrameCtx`.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
