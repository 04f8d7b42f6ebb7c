//! Window and event loop.
//!
//! Owns the `winit` EventLoop and the single game window, and wires it to the
//! GPU layer. Errors raised by the app through `RuntimeCtx::fail` come back out
//! of `Runtime::run`.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
