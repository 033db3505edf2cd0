use winit::dpi::LogicalSize;

use crate::device::GpuInit;
use crate::paint::Color;
use crate::render::{Projection, ProjectionMode};
use crate::window::{RuntimeConfig, WindowMode};

/// Engine settings. Defaults reproduce the demo scene.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub projection_mode: ProjectionMode,
    pub projection: Projection,
    pub fps: u32,
    pub clear_color: Color,
    /// Degrees of camera rotation per unit of cursor motion.
    pub mouse_sensitivity: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "Engine 3D".to_string(),
            width: 800,
            height: 600,
            fullscreen: false,
            projection_mode: ProjectionMode::Perspective,
            projection: Projection::default(),
            fps: 60,
            clear_color: Color::rgb(0.1, 0.1, 0.15),
            mouse_sensitivity: 0.1,
        }
    }
}

impl EngineConfig {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    pub fn projection_mode(mut self, mode: ProjectionMode) -> Self {
        self.projection_mode = mode;
        self
    }

    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn mouse_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(f64::from(self.width), f64::from(self.height)),
            mode: WindowMode::from_fullscreen(self.fullscreen),
            capture_cursor: true,
            target_fps: self.fps,
        }
    }

    pub fn gpu_init(&self) -> GpuInit {
        GpuInit::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_scene() {
        let c = EngineConfig::default();
        assert_eq!((c.width, c.height), (800, 600));
        assert!(!c.fullscreen);
        assert_eq!(c.projection_mode, ProjectionMode::Perspective);
        assert_eq!(c.fps, 60);
        assert_eq!(c.clear_color, Color::rgb(0.1, 0.1, 0.15));
        assert_eq!(c.mouse_sensitivity, 0.1);
    }

    #[test]
    fn runtime_config_follows_engine_settings() {
        let c = EngineConfig::default()
            .title("demo")
            .size(1024, 768)
            .fullscreen(true)
            .fps(30);
        let rc = c.runtime_config();
        assert_eq!(rc.title, "demo");
        assert_eq!(rc.initial_size, LogicalSize::new(1024.0, 768.0));
        assert_eq!(rc.mode, WindowMode::Fullscreen);
        assert_eq!(rc.target_fps, 30);
    }
}
