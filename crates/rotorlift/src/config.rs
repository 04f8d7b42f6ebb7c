use rotorlift_engine::coords::{Rect, Vec2, Viewport};
use rotorlift_engine::paint::Colour;
use rotorlift_engine::render::ViewConfig;

use crate::palette;

/// Gameplay and presentation tuning.
///
/// Rates are per frame, matching the frame-locked feel of the game; only the
/// respawn timer runs on wall-clock seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub clear: Colour,
    pub view: ViewConfig,

    /// Parent scale the helicopter is drawn under; converts its translation
    /// into map units.
    pub world_scale: f32,

    /// Degrees per frame.
    pub turn_rate: f32,
    /// Body units per frame.
    pub thrust: f32,
    /// Degrees per frame; the two rotors spin in opposite directions.
    pub rotor_spin: f32,

    /// Half-width of the square used for pickup and landing checks.
    pub reach: f32,
    pub helipad: Vec2,

    pub flying_scale: f32,
    pub landed_scale: f32,

    pub needle: NeedleConfig,

    /// Seconds before a rescued person reappears.
    pub respawn_delay: f32,

    /// Flood ripple spacing is drawn from `[min, min + span)` every frame.
    pub flood_min: f32,
    pub flood_span: f32,

    pub minimap: MinimapConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            clear: palette::GREEN,
            view: ViewConfig::default(),
            world_scale: 0.1,
            turn_rate: 5.0,
            thrust: 1.5,
            rotor_spin: 12.0,
            reach: 1.2,
            helipad: Vec2::new(7.0, 3.0),
            flying_scale: 0.5,
            landed_scale: 0.4,
            needle: NeedleConfig::default(),
            respawn_delay: 2.0,
            flood_min: 0.2,
            flood_span: 1.0,
            minimap: MinimapConfig::default(),
        }
    }
}

/// Speedometer needle sweep, in degrees. Rest is at `max`; thrust pulls it
/// toward `min`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NeedleConfig {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Default for NeedleConfig {
    fn default() -> Self {
        Self {
            min: 45.0,
            max: 180.0,
            step: 2.0,
        }
    }
}

/// Square inset in the bottom-right corner, in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MinimapConfig {
    pub size: f32,
    /// Gap between the inset and the bottom edge.
    pub margin: f32,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            size: 200.0,
            margin: 20.0,
        }
    }
}

impl MinimapConfig {
    /// Inset rectangle for a canvas, flush with the right edge.
    pub fn inset(&self, canvas: Viewport) -> Rect {
        Rect::new(
            canvas.width - self.size,
            canvas.height - self.margin - self.size,
            self.size,
            self.size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimap_sits_bottom_right_of_default_window() {
        let inset = MinimapConfig::default().inset(Viewport::new(800.0, 600.0));
        assert_eq!(inset, Rect::new(600.0, 380.0, 200.0, 200.0));
    }

    #[test]
    fn minimap_tracks_resized_canvas() {
        let inset = MinimapConfig::default().inset(Viewport::new(1024.0, 768.0));
        assert_eq!(inset.origin, Vec2::new(824.0, 548.0));
    }

    #[test]
    fn needle_rests_at_max() {
        let n = NeedleConfig::default();
        assert!(n.min < n.max);
        assert_eq!(n.max, 180.0);
    }
}
