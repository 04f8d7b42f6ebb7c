//! Flat colours used across the map.

use rotorlift_engine::paint::Colour;

pub const YELLOW: Colour = Colour::rgb(1.0, 1.0, 0.0);
pub const BLUE: Colour = Colour::rgb(0.0, 0.0, 1.0);
pub const GREY: Colour = Colour::rgb(0.5, 0.5, 0.5);
pub const LIGHT_GREY: Colour = Colour::rgb(0.8, 0.8, 0.6);
/// Grass; also the clear colour.
pub const GREEN: Colour = Colour::rgb(0.6, 0.9, 0.0);
pub const BROWN: Colour = Colour::rgb(0.6, 0.3, 0.0);
pub const WOOD: Colour = Colour::rgb(0.8, 0.4, 0.0);
pub const LIGHT_WOOD: Colour = Colour::rgb(0.8, 0.6, 0.0);
/// Flood water.
pub const MURKY_GREEN: Colour = Colour::rgb(0.6, 0.8, 0.5);
pub const RED: Colour = Colour::rgb(1.0, 0.0, 0.0);
pub const BLACK: Colour = Colour::black();
pub const WHITE: Colour = Colour::white();
pub const SKIN: Colour = Colour::rgb(0.8, 0.6, 0.3);
pub const DARK_GREY: Colour = Colour::rgb(0.4, 0.4, 0.4);
