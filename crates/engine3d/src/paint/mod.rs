//! Color model shared by the engine and renderers.

pub mod color;

pub use color::Color;
