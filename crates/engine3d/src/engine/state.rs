use glam::Mat4;

use crate::camera::MouseLook;
use crate::coords::Viewport;
use crate::core::{App, AppControl, FrameCtx};
use crate::input::InputState;
use crate::render::{camera_view, ProjectionMode, TriangleRenderer};
use crate::time::FrameTime;
use crate::window::WindowMode;

use super::config::EngineConfig;
use super::controls::Controls;

/// Effects of one input step that the runtime has to carry out.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct InputOutcome {
    /// Close flag raised; the loop stops after this tick.
    pub close: bool,
    /// The window must be recreated in this mode.
    pub window_mode: Option<WindowMode>,
}

/// All mutable engine state, owned in one place and advanced once per tick.
///
/// Tick order: [`process_input`](Self::process_input),
/// [`process_mouse`](Self::process_mouse), [`update`](Self::update),
/// [`render`](Self::render).
pub struct EngineState {
    config: EngineConfig,
    fullscreen: bool,
    projection_mode: ProjectionMode,
    controls: Controls,
    mouse: MouseLook,
    triangle: TriangleRenderer,
}

impl EngineState {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            fullscreen: config.fullscreen,
            projection_mode: config.projection_mode,
            controls: Controls::new(),
            mouse: MouseLook::new(config.mouse_sensitivity),
            triangle: TriangleRenderer::new(),
            config,
        }
    }

    pub fn window_mode(&self) -> WindowMode {
        WindowMode::from_fullscreen(self.fullscreen)
    }

    pub fn projection_mode(&self) -> ProjectionMode {
        self.projection_mode
    }

    /// Windowed-mode size; fullscreen toggles never change it.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Camera `(yaw, pitch)` in degrees.
    pub fn camera_angles(&self) -> (f32, f32) {
        (self.mouse.yaw(), self.mouse.pitch())
    }

    /// Samples the keyboard and applies projection and fullscreen changes.
    pub fn process_input(&mut self, input: &InputState) -> InputOutcome {
        let actions = self.controls.sample(input);
        let mut outcome = InputOutcome {
            close: actions.quit,
            window_mode: None,
        };

        if actions.quit {
            log::info!("quit requested");
        }

        if let Some(mode) = actions.projection {
            if mode != self.projection_mode {
                log::info!("projection: {:?}", mode);
                self.projection_mode = mode;
            }
        }

        if actions.toggle_fullscreen {
            self.fullscreen = !self.fullscreen;
            log::info!("fullscreen: {}", self.fullscreen);
            outcome.window_mode = Some(self.window_mode());
        }

        outcome
    }

    /// Folds the cursor movement since the last tick into the camera angles.
    pub fn process_mouse(&mut self, input: &InputState) {
        self.mouse.integrate(input.cursor_position());
    }

    /// Simulation step. The demo scene is static.
    pub fn update(&mut self, _time: FrameTime) {}

    /// Projection times camera view for a drawable of `viewport` size.
    pub fn view_projection(&self, viewport: Viewport) -> Mat4 {
        let projection = self.config.projection.matrix(self.projection_mode(), viewport);
        projection * camera_view(self.mouse.yaw(), self.mouse.pitch())
    }

    /// Clears the frame and draws the triangle.
    pub fn render(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let view_proj = self.view_projection(ctx.viewport());
        let triangle = &mut self.triangle;

        ctx.render(self.config.clear_color, |rctx, target| {
            triangle.render(rctx, target, view_proj);
        })
    }
}

impl App for EngineState {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let outcome = self.process_input(ctx.input);
        if let Some(mode) = outcome.window_mode {
            ctx.runtime.recreate_window(mode);
        }

        self.process_mouse(ctx.input);
        self.update(ctx.time);

        let control = self.render(ctx);

        if outcome.close {
            AppControl::Exit
        } else {
            control
        }
    }

    /// The replacement window comes with a new device, and its first cursor
    /// sample must not turn into a jump.
    fn on_window_replaced(&mut self) {
        self.triangle.release();
        self.mouse.reset();
        let (w, h) = self.dimensions();
        log::debug!("window replaced ({:?}, windowed size {w}x{h})", self.window_mode());
    }

    fn on_shutdown(&mut self) {
        self.triangle.release();
        let (yaw, pitch) = self.camera_angles();
        log::info!("engine shutting down (yaw {yaw:.1}, pitch {pitch:.1})");
    }
}
