use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;

use rotorlift_engine::coords::Viewport;
use rotorlift_engine::core::{App, AppControl, FrameCtx};
use rotorlift_engine::input::InputState;
use rotorlift_engine::render::SceneRenderer;
use rotorlift_engine::scene::{DrawList, Scene};

use crate::assembly::{self, Rig};
use crate::config::GameConfig;
use crate::frame;
use crate::rules::{Controls, GameState};

/// Everything that changes from frame to frame, with no GPU attached.
pub struct Game {
    config: GameConfig,
    scene: Scene,
    rig: Rig,
    state: GameState,
    rng: StdRng,
    draw_list: DrawList,
}

impl Game {
    pub fn new(config: GameConfig, mut rng: StdRng) -> Result<Self> {
        let mut scene = Scene::new();
        let rig = assembly::build(&mut scene, config.flying_scale)
            .context("failed to assemble scene")?;
        let state = GameState::new(&config, &mut rng);

        Ok(Self {
            config,
            scene,
            rig,
            state,
            rng,
            draw_list: DrawList::new(),
        })
    }

    /// Applies one frame of input and re-records the draw list for `canvas`.
    ///
    /// Escape returns `Exit` before anything moves.
    pub fn advance(&mut self, input: &InputState, dt: f32, canvas: Viewport) -> AppControl {
        let controls = Controls::from_input(input);
        if controls.quit {
            log::info!("escape pressed, shutting down");
            return AppControl::Exit;
        }

        self.state.step(
            &self.config,
            &mut self.scene,
            &self.rig,
            controls,
            dt,
            &mut self.rng,
        );
        frame::compose(
            &self.config,
            &self.scene,
            &self.rig,
            &self.state,
            canvas,
            &mut self.draw_list,
        );

        AppControl::Continue
    }
}

/// The game as seen by the runtime.
pub struct RotorliftApp {
    game: Game,
    /// Built on the first frame, once a surface format is known.
    renderer: Option<SceneRenderer>,
}

impl RotorliftApp {
    pub fn new(config: GameConfig) -> Result<Self> {
        Ok(Self {
            game: Game::new(config, StdRng::from_entropy())?,
            renderer: None,
        })
    }
}

impl App for RotorliftApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.game.advance(ctx.input, ctx.time.dt, ctx.window.canvas()) == AppControl::Exit {
            return AppControl::Exit;
        }

        let format = ctx.gpu.surface_format();
        let renderer = match self.renderer.take() {
            Some(r) if r.format() == format => r,
            _ => match SceneRenderer::new(ctx.gpu.device(), format) {
                Ok(r) => r,
                Err(err) => {
                    ctx.runtime
                        .fail(anyhow::Error::new(err).context("failed to build the scene renderer"));
                    return AppControl::Exit;
                }
            },
        };
        let renderer = self.renderer.insert(renderer);

        let list = &self.game.draw_list;
        ctx.render(self.game.config.clear, |rctx, target| {
            renderer.render(rctx, target, list);
        })
    }
}
