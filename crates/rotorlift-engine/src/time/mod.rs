//! Frame timing.
//!
//! One `FrameClock` lives in each window entry; the runtime ticks it once per
//! redraw and hands the resulting `FrameTime` to the app.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
