use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::time::FrameClock;

/// Game window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "rotorlift".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            resizable: true,
        }
    }
}

/// Requests an app can make of the runtime during a callback.
///
/// They take effect once the callback returns.
#[derive(Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    /// Stops the loop; `Runtime::run` returns `Ok`.
    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }

    /// Stops the loop; `Runtime::run` returns `err`.
    pub fn fail(&mut self, err: anyhow::Error) {
        self.commands.push(Command::Fail(err));
    }
}

enum Command {
    Exit,
    Fail(anyhow::Error),
}

/// How the loop is going to end, accumulated across callbacks.
#[derive(Default)]
struct Outcome {
    exit: bool,
    /// First failure wins; later ones are only logged.
    error: Option<anyhow::Error>,
}

impl Outcome {
    fn absorb(&mut self, ctx: RuntimeCtx) {
        for cmd in ctx.commands {
            match cmd {
                Command::Exit => self.exit = true,
                Command::Fail(err) => self.fail(err),
            }
        }
    }

    fn fail(&mut self, err: anyhow::Error) {
        log::error!("{err:#}");
        self.exit = true;
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    fn finish(self) -> Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the game window and drives `app` until it exits, the window is
    /// closed, or something fails. Failures from startup or from the app
    /// (`RuntimeCtx::fail`) are returned.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut host = Host {
            config,
            gpu_init,
            app,
            window: None,
            outcome: Outcome::default(),
        };

        event_loop
            .run_app(&mut host)
            .context("winit event loop terminated with error")?;

        host.outcome.finish()
    }
}

/// The window together with the GPU state that borrows it.
#[self_referencing]
struct GameWindow {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

impl GameWindow {
    fn open(event_loop: &ActiveEventLoop, config: &RuntimeConfig, gpu_init: GpuInit) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size)
            .with_resizable(config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        GameWindowTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")
    }

    fn request_redraw(&self) {
        self.with_window(|w| w.request_redraw());
    }

    fn resize_to_window(&mut self) {
        let size = self.with_window(|w| w.inner_size());
        log::debug!("window now {}x{}", size.width, size.height);
        self.with_gpu_mut(|gpu| gpu.resize(size));
    }

    /// One update-and-render pass of `app`.
    fn redraw<A: App>(&mut self, app: &mut A, runtime: &mut RuntimeCtx) -> AppControl {
        self.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx {
                    window: fields.window,
                },
                gpu: fields.gpu,
                input: fields.input_state,
                input_frame: fields.input_frame,
                time: fields.clock.tick(),
                runtime,
            };
            let control = app.on_frame(&mut ctx);

            // Deltas belong to exactly one frame.
            fields.input_frame.clear();
            control
        })
    }
}

struct Host<A: App + 'static> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    /// Opened on the first `resumed`.
    window: Option<GameWindow>,
    outcome: Outcome,
}

impl<A: App + 'static> ApplicationHandler for Host<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match GameWindow::open(event_loop, &self.config, self.gpu_init.clone()) {
            Ok(window) => {
                window.request_redraw();
                self.window = Some(window);
            }
            Err(err) => {
                self.outcome.fail(err.context("failed to open the game window"));
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.outcome.exit {
            event_loop.exit();
            return;
        }

        // Continuous redraw; FIFO presentation paces the loop.
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.as_mut() else {
            return;
        };

        if let Some(ev) = translate_window_event(&event) {
            window.with_mut(|f| f.input_state.apply_event(f.input_frame, ev));
        }

        let mut runtime = RuntimeCtx::default();
        let mut control = self.app.on_window_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("window close requested");
                runtime.exit();
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                window.resize_to_window();
                window.request_redraw();
            }
            WindowEvent::RedrawRequested if control == AppControl::Continue => {
                control = window.redraw(&mut self.app, &mut runtime);
            }
            _ => {}
        }

        if control == AppControl::Exit {
            runtime.exit();
        }
        self.outcome.absorb(runtime);

        if self.outcome.exit {
            // Release the surface before the window goes away.
            self.window = None;
            event_loop.exit();
        }
    }
}
