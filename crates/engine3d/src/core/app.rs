use winit::event::WindowEvent;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by `window::Runtime`.
pub trait App {
    /// Called for window events, before the runtime handles them.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per processed tick of the fixed-timestep gate.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called when the window and GPU context are torn down for recreation,
    /// before the replacement exists. GPU resources built on the old device
    /// must be dropped here.
    fn on_window_replaced(&mut self) {}

    /// Called exactly once, after the loop has stopped and before the window
    /// and GPU context are dropped.
    fn on_shutdown(&mut self) {}
}
