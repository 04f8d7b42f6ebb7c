//! GPU device + surface management.
//!
//! One device and one swapchain for the game window. `Gpu::acquire` hands out
//! a cleared frame; surface loss is absorbed here so callers only see a
//! skipped frame or a fatal error.

mod context;
mod init;
mod surface;

pub use context::{Gpu, GpuFrame};
pub use init::GpuInit;
