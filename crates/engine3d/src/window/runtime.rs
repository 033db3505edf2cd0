use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{CursorGrabMode, Fullscreen, Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::{translate_device_event, translate_window_event};
use crate::input::{InputEvent, InputState};
use crate::time::FrameGate;

/// Presentation mode of the engine window.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum WindowMode {
    #[default]
    Windowed,
    /// Borderless fullscreen on the primary monitor.
    Fullscreen,
}

impl WindowMode {
    pub fn from_fullscreen(fullscreen: bool) -> Self {
        if fullscreen {
            WindowMode::Fullscreen
        } else {
            WindowMode::Windowed
        }
    }

    pub fn is_fullscreen(self) -> bool {
        self == WindowMode::Fullscreen
    }
}

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Size of the windowed-mode window.
    pub initial_size: LogicalSize<f64>,
    pub mode: WindowMode,
    /// Lock and hide the cursor while the window is focused.
    pub capture_cursor: bool,
    /// Fixed-timestep rate of `App::on_frame`.
    pub target_fps: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "engine3d".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            mode: WindowMode::Windowed,
            capture_cursor: true,
            target_fps: 60,
        }
    }
}

/// Runtime context passed to the application.
///
/// Commands are buffered and applied after the current callback returns, so
/// the window is never replaced underneath a running frame.
#[derive(Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    /// Destroys the current window and GPU context and creates new ones in `mode`.
    pub fn recreate_window(&mut self, mode: WindowMode) {
        self.commands.push(Command::RecreateWindow(mode));
    }

    /// Sets the close flag; the loop stops once the current tick is done.
    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }
}

enum Command {
    RecreateWindow(WindowMode),
    Exit,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Creates the event loop and runs `app` until the close flag is observed.
    ///
    /// Window or GPU initialization failures stop the loop and are returned.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        let result = event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error");

        state.shutdown();
        result?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input: InputState,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    /// The single live window/context pair.
    window: Option<WindowEntry>,
    gate: FrameGate,

    fatal: Option<anyhow::Error>,
    exit_requested: bool,
    shut_down: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        let gate = FrameGate::new(config.target_fps);
        Self {
            config,
            gpu_init,
            app,
            window: None,
            gate,
            fatal: None,
            exit_requested: false,
            shut_down: false,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        self.request_exit();
        event_loop.exit();
    }

    fn create_window(
        &mut self,
        event_loop: &ActiveEventLoop,
        mode: WindowMode,
        input: InputState,
    ) -> Result<()> {
        let mut attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        if mode.is_fullscreen() {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(
                event_loop.primary_monitor(),
            )));
        }

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        if self.config.capture_cursor {
            capture_cursor(&window);
        }

        let gpu_init = self.gpu_init.clone();

        // On error the window is dropped together with the builder.
        let entry = WindowEntryTryBuilder {
            input,
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("failed to initialize GPU context")?;

        let size = entry.borrow_gpu().size();
        log::info!("window created: {:?} {}x{}", mode, size.width, size.height);

        entry.with_window(|w| w.request_redraw());
        self.window = Some(entry);
        Ok(())
    }

    fn recreate_window(&mut self, event_loop: &ActiveEventLoop, mode: WindowMode) -> Result<()> {
        // Old surface and device go first; only one context is ever live.
        let mut input = self
            .window
            .take()
            .map(|entry| entry.into_heads().input)
            .unwrap_or_default();

        // The virtual cursor carries over. Releases for held keys went to the old window.
        input.keys_down.clear();

        self.app.on_window_replaced();

        self.create_window(event_loop, mode, input)
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, mut ctx: RuntimeCtx) {
        for cmd in ctx.commands.drain(..) {
            match cmd {
                Command::RecreateWindow(mode) => {
                    if let Err(e) = self.recreate_window(event_loop, mode) {
                        self.fail(event_loop, e);
                    }
                }
                Command::Exit => self.request_exit(),
            }
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }

    /// Runs one tick if the gate allows it.
    fn run_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(ft) = self.gate.try_tick() else {
            return;
        };

        let mut runtime_ctx = RuntimeCtx::default();
        let mut control = AppControl::Continue;

        let (app, window) = (&mut self.app, &mut self.window);
        if let Some(entry) = window.as_mut() {
            entry.with_mut(|fields| {
                let mut ctx = FrameCtx {
                    window: fields.window,
                    gpu: fields.gpu,
                    input: fields.input,
                    time: ft,
                    runtime: &mut runtime_ctx,
                };

                control = app.on_frame(&mut ctx);
            });
        }

        if control == AppControl::Exit {
            runtime_ctx.exit();
        }

        self.apply_commands(event_loop, runtime_ctx);
    }

    /// Tears down the window and GPU context. Idempotent.
    fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        self.app.on_shutdown();
        self.window = None;
        log::info!("shutdown complete");
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.create_window(event_loop, self.config.mode, InputState::default()) {
            self.fail(event_loop, e.context("failed to create initial window"));
            return;
        }

        self.gate.reset();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Sleep until the next tick is due instead of spinning.
        let now = Instant::now();
        let deadline = self.gate.next_deadline();
        let wake_at = if now >= deadline {
            if let Some(entry) = self.window.as_ref() {
                entry.with_window(|w| w.request_redraw());
            }
            now + self.gate.interval()
        } else {
            deadline
        };

        event_loop.set_control_flow(ControlFlow::WaitUntil(wake_at));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.window.as_mut() else {
            return;
        };

        if let Some(ev) = translate_window_event(&event) {
            if self.config.capture_cursor && ev == InputEvent::Focused(true) {
                entry.with_window(|w| capture_cursor(w));
            }
            entry.with_input_mut(|input| input.apply_event(ev));
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.request_exit();
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.request_exit();
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
            }

            WindowEvent::RedrawRequested => self.run_frame(event_loop),

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let Some(ev) = translate_device_event(&event) else {
            return;
        };

        if let Some(entry) = self.window.as_mut() {
            entry.with_input_mut(|input| input.apply_event(ev));
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

/// Locks and hides the cursor so pointer motion drives the camera.
///
/// Not every platform supports `Locked`; `Confined` is the fallback.
fn capture_cursor(window: &Window) {
    let result = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));

    match result {
        Ok(()) => window.set_cursor_visible(false),
        Err(e) => log::warn!("cursor capture unavailable: {e}"),
    }
}
