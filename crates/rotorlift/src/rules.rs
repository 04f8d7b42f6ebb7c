use rand::Rng;

use rotorlift_engine::coords::Vec2;
use rotorlift_engine::input::{InputState, Key};
use rotorlift_engine::scene::Scene;

use crate::assembly::Rig;
use crate::config::GameConfig;

/// Held-key snapshot the rules read each frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Controls {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub pick_up: bool,
    pub land: bool,
    pub take_off: bool,
    pub quit: bool,
}

impl Controls {
    pub fn from_input(input: &InputState) -> Self {
        Self {
            turn_left: input.key_down(Key::ArrowLeft),
            turn_right: input.key_down(Key::ArrowRight),
            thrust: input.key_down(Key::ArrowUp),
            pick_up: input.key_down(Key::P),
            land: input.key_down(Key::L),
            take_off: input.key_down(Key::T),
            quit: input.key_down(Key::Escape),
        }
    }
}

/// Transitions that happened during one `GameState::step`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct StepReport {
    pub rescued: bool,
    pub landed: bool,
    pub took_off: bool,
}

/// Game state that does not live on scene entities.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Spacing between flood ripples this frame.
    pub flood: f32,
    pub landed: bool,
    pub person_visible: bool,
    /// Map position of the stranded person.
    pub person: Vec2,
    /// Seconds since the last rescue.
    pub timer: f32,
}

impl GameState {
    pub fn new(config: &GameConfig, rng: &mut impl Rng) -> Self {
        Self {
            flood: roll_flood(config, rng),
            landed: false,
            person_visible: false,
            person: roll_spawn(rng),
            timer: 0.0,
        }
    }

    /// Map position of the helicopter.
    pub fn helicopter_position(&self, config: &GameConfig, scene: &Scene, rig: &Rig) -> Vec2 {
        scene[rig.helicopter].translation * config.world_scale
    }

    /// Advances one frame.
    ///
    /// Movement rates are per frame; `dt` only drives the respawn timer.
    pub fn step(
        &mut self,
        config: &GameConfig,
        scene: &mut Scene,
        rig: &Rig,
        controls: Controls,
        dt: f32,
        rng: &mut impl Rng,
    ) -> StepReport {
        let mut report = StepReport::default();

        self.flood = roll_flood(config, rng);
        scene[rig.front_rotor].rotation += config.rotor_spin;
        scene[rig.rear_rotor].rotation -= config.rotor_spin;

        let position = self.helicopter_position(config, scene, rig);
        log::trace!("helicopter at ({:.2}, {:.2})", position.x, position.y);

        // The pickup zone is live even while the person is still hidden.
        if controls.pick_up && within(position, self.person, config.reach) {
            self.person_visible = false;
            self.timer = 0.0;
            self.person = roll_spawn(rng);
            report.rescued = true;
            log::info!(
                "person rescued; next one at ({:.2}, {:.2})",
                self.person.x,
                self.person.y
            );
        }

        if controls.land && within(position, config.helipad, config.reach) {
            let s = config.landed_scale;
            scene[rig.helicopter].scale = Vec2::new(s, s);
            if !self.landed {
                log::info!("landed on helipad");
            }
            self.landed = true;
            report.landed = true;
        }

        if self.landed && controls.take_off {
            let s = config.flying_scale;
            scene[rig.helicopter].scale = Vec2::new(s, s);
            self.landed = false;
            report.took_off = true;
            log::info!("took off");
        }

        if !self.landed {
            self.fly(config, scene, rig, controls);
        }

        self.timer += dt;
        if self.timer >= config.respawn_delay {
            self.person_visible = true;
        }

        report
    }

    fn fly(&self, config: &GameConfig, scene: &mut Scene, rig: &Rig, controls: Controls) {
        let body = &mut scene[rig.helicopter];
        if controls.turn_left {
            body.rotation += config.turn_rate;
        }
        if controls.turn_right {
            body.rotation -= config.turn_rate;
        }

        let needle = config.needle;
        if controls.thrust {
            let heading = body.rotation.to_radians();
            body.translation.x -= config.thrust * heading.sin();
            body.translation.y += config.thrust * heading.cos();

            let reading = &mut scene[rig.needle].rotation;
            if *reading > needle.min {
                *reading -= needle.step;
            }
        } else {
            let reading = &mut scene[rig.needle].rotation;
            if *reading < needle.max {
                *reading += needle.step;
            }
        }
    }
}

/// Square proximity test, inclusive on the boundary.
fn within(a: Vec2, b: Vec2, reach: f32) -> bool {
    (a.x - b.x).abs() <= reach && (a.y - b.y).abs() <= reach
}

fn roll_flood(config: &GameConfig, rng: &mut impl Rng) -> f32 {
    config.flood_min + rng.gen_range(0.0..config.flood_span)
}

/// Somewhere on the flooded west half of the map.
fn roll_spawn(rng: &mut impl Rng) -> Vec2 {
    Vec2::new(rng.gen_range(-10.0..0.0), rng.gen_range(-5.0..5.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const DT: f32 = 1.0 / 60.0;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    struct World {
        config: GameConfig,
        scene: Scene,
        rig: Rig,
        state: GameState,
        rng: StdRng,
    }

    impl World {
        fn new() -> Self {
            let config = GameConfig::default();
            let mut scene = Scene::new();
            let rig = assembly::build(&mut scene, config.flying_scale).expect("assembly");
            let mut rng = StdRng::seed_from_u64(7);
            let state = GameState::new(&config, &mut rng);
            Self {
                config,
                scene,
                rig,
                state,
                rng,
            }
        }

        fn step(&mut self, controls: Controls) -> StepReport {
            self.state.step(
                &self.config,
                &mut self.scene,
                &self.rig,
                controls,
                DT,
                &mut self.rng,
            )
        }

        /// Places the helicopter so that its map position is `p`.
        fn park_at(&mut self, p: Vec2) {
            let s = 1.0 / self.config.world_scale;
            self.scene[self.rig.helicopter].translation = Vec2::new(p.x * s, p.y * s);
        }
    }

    #[test]
    fn spawn_lands_in_flooded_area() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let p = roll_spawn(&mut rng);
            assert!((-10.0..0.0).contains(&p.x));
            assert!((-5.0..5.0).contains(&p.y));
        }
    }

    #[test]
    fn flood_spacing_stays_in_range() {
        let mut w = World::new();
        for _ in 0..100 {
            w.step(Controls::default());
            assert!(w.state.flood >= 0.2 && w.state.flood < 1.2);
        }
    }

    #[test]
    fn rotors_counter_rotate() {
        let mut w = World::new();
        w.step(Controls::default());
        w.step(Controls::default());
        assert_eq!(w.scene[w.rig.front_rotor].rotation, 24.0);
        assert_eq!(w.scene[w.rig.rear_rotor].rotation, -24.0);
    }

    #[test]
    fn thrust_moves_along_heading() {
        let mut w = World::new();
        w.step(Controls {
            thrust: true,
            ..Controls::default()
        });
        let t = w.scene[w.rig.helicopter].translation;
        assert!(approx(t.x, 0.0));
        assert!(approx(t.y, 1.5));

        w.scene[w.rig.helicopter].rotation = 90.0;
        w.step(Controls {
            thrust: true,
            ..Controls::default()
        });
        let t = w.scene[w.rig.helicopter].translation;
        assert!(approx(t.x, -1.5));
        assert!(approx(t.y, 1.5));
    }

    #[test]
    fn turning_is_five_degrees_per_frame() {
        let mut w = World::new();
        w.step(Controls {
            turn_left: true,
            ..Controls::default()
        });
        assert_eq!(w.scene[w.rig.helicopter].rotation, 5.0);
        w.step(Controls {
            turn_right: true,
            ..Controls::default()
        });
        w.step(Controls {
            turn_right: true,
            ..Controls::default()
        });
        assert_eq!(w.scene[w.rig.helicopter].rotation, -5.0);
    }

    #[test]
    fn needle_sweeps_between_limits() {
        let mut w = World::new();
        let thrust = Controls {
            thrust: true,
            ..Controls::default()
        };
        for _ in 0..200 {
            w.step(thrust);
        }
        let reading = w.scene[w.rig.needle].rotation;
        assert!(reading <= 45.0 && reading > 43.0);

        for _ in 0..200 {
            w.step(Controls::default());
        }
        assert_eq!(w.scene[w.rig.needle].rotation, 180.0);
    }

    #[test]
    fn person_appears_after_respawn_delay() {
        let mut w = World::new();
        assert!(!w.state.person_visible);
        // 1.5s at 60Hz
        for _ in 0..90 {
            w.step(Controls::default());
        }
        assert!(!w.state.person_visible);
        for _ in 0..40 {
            w.step(Controls::default());
        }
        assert!(w.state.person_visible);
    }

    #[test]
    fn pickup_requires_key_and_proximity() {
        let mut w = World::new();
        let target = w.state.person;

        w.park_at(target);
        let report = w.step(Controls::default());
        assert!(!report.rescued);

        w.park_at(Vec2::new(target.x + 1.3, target.y));
        let report = w.step(Controls {
            pick_up: true,
            ..Controls::default()
        });
        assert!(!report.rescued);

        w.park_at(Vec2::new(target.x + 1.0, target.y - 1.0));
        w.state.timer = 5.0;
        w.state.person_visible = true;
        let report = w.step(Controls {
            pick_up: true,
            ..Controls::default()
        });
        assert!(report.rescued);
        assert!(!w.state.person_visible);
        assert!(approx(w.state.timer, DT));
    }

    #[test]
    fn landing_shrinks_and_freezes_the_helicopter() {
        let mut w = World::new();
        w.park_at(Vec2::new(7.5, 2.5));

        let report = w.step(Controls {
            land: true,
            ..Controls::default()
        });
        assert!(report.landed);
        assert!(w.state.landed);
        assert_eq!(w.scene[w.rig.helicopter].scale, Vec2::new(0.4, 0.4));

        let before = w.scene[w.rig.helicopter].translation;
        w.step(Controls {
            thrust: true,
            turn_left: true,
            ..Controls::default()
        });
        assert_eq!(w.scene[w.rig.helicopter].translation, before);
        assert_eq!(w.scene[w.rig.helicopter].rotation, 0.0);
    }

    #[test]
    fn landing_away_from_pad_does_nothing() {
        let mut w = World::new();
        w.park_at(Vec2::new(0.0, 0.0));
        let report = w.step(Controls {
            land: true,
            ..Controls::default()
        });
        assert!(!report.landed);
        assert_eq!(w.scene[w.rig.helicopter].scale, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn take_off_restores_flight() {
        let mut w = World::new();
        w.park_at(Vec2::new(7.0, 3.0));
        w.step(Controls {
            land: true,
            ..Controls::default()
        });

        let report = w.step(Controls {
            take_off: true,
            ..Controls::default()
        });
        assert!(report.took_off);
        assert!(!w.state.landed);
        assert_eq!(w.scene[w.rig.helicopter].scale, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn take_off_while_airborne_is_ignored() {
        let mut w = World::new();
        let report = w.step(Controls {
            take_off: true,
            ..Controls::default()
        });
        assert!(!report.took_off);
    }

    #[test]
    fn boundary_counts_as_within() {
        assert!(within(Vec2::new(0.0, 0.0), Vec2::new(1.2, -1.2), 1.2));
        assert!(!within(Vec2::new(0.0, 0.0), Vec2::new(1.25, 0.0), 1.2));
    }
}
