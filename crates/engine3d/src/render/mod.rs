//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipelines, buffers) and creates them
//! lazily against the `RenderCtx` it is handed.
//!
//! Convention:
//! - world space is right-handed, the camera looks down -Z
//! - matrices are built CPU-side with `glam` and uploaded as uniforms
//! - clip-space depth follows wgpu (`[0, 1]`)

mod ctx;
pub mod projection;
mod triangle;

pub use ctx::{RenderCtx, RenderTarget};
pub use projection::{camera_view, Projection, ProjectionBounds, ProjectionMode};
pub use triangle::{ColorVertex, TriangleRenderer, TRIANGLE_VERTICES};
