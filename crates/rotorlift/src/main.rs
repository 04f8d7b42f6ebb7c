//! Rotorlift: fly a rescue helicopter over a flooded village.
//!
//! Arrow keys turn and thrust, `P` picks up a stranded person, `L` lands on
//! the helipad, `T` takes off again and `Escape` quits.

mod app;
mod assembly;
mod config;
mod frame;
mod palette;
mod rules;

use anyhow::Result;

use rotorlift_engine::device::GpuInit;
use rotorlift_engine::logging::{LoggingConfig, init_logging};
use rotorlift_engine::window::{Runtime, RuntimeConfig};

use crate::app::RotorliftApp;
use crate::config::GameConfig;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let app = RotorliftApp::new(GameConfig::default())?;
    log::info!("rotorlift starting");

    Runtime::run(RuntimeConfig::default(), GpuInit::default(), app)
}
