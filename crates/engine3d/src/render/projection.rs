use glam::{Mat4, Vec3, Vec4};

use crate::coords::Viewport;

/// Projection selected by the user.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ProjectionMode {
    #[default]
    Perspective,
    Orthographic,
}

/// Projection parameters.
///
/// Angles are in degrees, distances in world units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,

    /// Vertical half extent of the orthographic volume.
    pub ortho_half_extent: f32,

    /// Orthographic depth range is `[-ortho_depth, ortho_depth]`.
    pub ortho_depth: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_deg: 60.0,
            near: 0.1,
            far: 100.0,
            ortho_half_extent: 5.0,
            ortho_depth: 10.0,
        }
    }
}

/// Clip volume bounds in the glFrustum/glOrtho parameter order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ProjectionBounds {
    pub mode: ProjectionMode,
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn bounds(&self, mode: ProjectionMode, viewport: Viewport) -> ProjectionBounds {
        let aspect = viewport.aspect();

        match mode {
            ProjectionMode::Perspective => {
                let top = (self.fov_y_deg.to_radians() / 2.0).tan() * self.near;
                let right = top * aspect;
                ProjectionBounds {
                    mode,
                    left: -right,
                    right,
                    bottom: -top,
                    top,
                    near: self.near,
                    far: self.far,
                }
            }
            ProjectionMode::Orthographic => {
                let h = self.ortho_half_extent;
                ProjectionBounds {
                    mode,
                    left: -h * aspect,
                    right: h * aspect,
                    bottom: -h,
                    top: h,
                    near: -self.ortho_depth,
                    far: self.ortho_depth,
                }
            }
        }
    }

    /// Clip-space matrix for wgpu (depth in `[0, 1]`).
    pub fn matrix(&self, mode: ProjectionMode, viewport: Viewport) -> Mat4 {
        self.bounds(mode, viewport).to_matrix()
    }
}

/// Maps OpenGL clip depth `[-w, w]` onto wgpu's `[0, w]`.
const GL_TO_WGPU_DEPTH: Mat4 = Mat4::from_cols(
    Vec4::new(1.0, 0.0, 0.0, 0.0),
    Vec4::new(0.0, 1.0, 0.0, 0.0),
    Vec4::new(0.0, 0.0, 0.5, 0.0),
    Vec4::new(0.0, 0.0, 0.5, 1.0),
);

impl ProjectionBounds {
    /// Right-handed, camera looking down -Z.
    pub fn to_gl_matrix(&self) -> Mat4 {
        let Self { left: l, right: r, bottom: b, top: t, near: n, far: f, .. } = *self;

        match self.mode {
            ProjectionMode::Perspective => Mat4::from_cols(
                Vec4::new(2.0 * n / (r - l), 0.0, 0.0, 0.0),
                Vec4::new(0.0, 2.0 * n / (t - b), 0.0, 0.0),
                Vec4::new((r + l) / (r - l), (t + b) / (t - b), -(f + n) / (f - n), -1.0),
                Vec4::new(0.0, 0.0, -2.0 * f * n / (f - n), 0.0),
            ),
            ProjectionMode::Orthographic => Mat4::from_cols(
                Vec4::new(2.0 / (r - l), 0.0, 0.0, 0.0),
                Vec4::new(0.0, 2.0 / (t - b), 0.0, 0.0),
                Vec4::new(0.0, 0.0, -2.0 / (f - n), 0.0),
                Vec4::new(-(r + l) / (r - l), -(t + b) / (t - b), -(f + n) / (f - n), 1.0),
            ),
        }
    }

    pub fn to_matrix(&self) -> Mat4 {
        GL_TO_WGPU_DEPTH * self.to_gl_matrix()
    }
}

/// Distance the scene is pushed away from the viewer.
pub const SCENE_DISTANCE: f32 = 5.0;

/// Free-look model-view: the world rotates against the camera angles.
///
/// Equivalent to rotating by `-pitch` around X, then `-yaw` around Y, then
/// translating the scene `SCENE_DISTANCE` units along -Z.
pub fn camera_view(yaw_deg: f32, pitch_deg: f32) -> Mat4 {
    Mat4::from_rotation_x((-pitch_deg).to_radians())
        * Mat4::from_rotation_y((-yaw_deg).to_radians())
        * Mat4::from_translation(Vec3::new(0.0, 0.0, -SCENE_DISTANCE))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;
    const VP: Viewport = Viewport::new(800.0, 600.0);

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn perspective_bounds_for_800x600() {
        let b = Projection::default().bounds(ProjectionMode::Perspective, VP);
        let top = 30.0_f32.to_radians().tan() * 0.1;
        assert!(approx(b.top, top));
        assert!(approx(b.top, 0.057_735));
        assert!(approx(b.right, top * 4.0 / 3.0));
        assert!(approx(b.left, -b.right));
        assert!(approx(b.bottom, -b.top));
        assert_eq!((b.near, b.far), (0.1, 100.0));
    }

    #[test]
    fn orthographic_bounds_for_800x600() {
        let b = Projection::default().bounds(ProjectionMode::Orthographic, VP);
        assert!(approx(b.right, 6.666_667));
        assert!(approx(b.left, -6.666_667));
        assert_eq!((b.bottom, b.top), (-5.0, 5.0));
        assert_eq!((b.near, b.far), (-10.0, 10.0));
    }

    #[test]
    fn perspective_maps_near_and_far_to_wgpu_depth_range() {
        let m = Projection::default().matrix(ProjectionMode::Perspective, VP);
        let near = m.project_point3(Vec3::new(0.0, 0.0, -0.1));
        let far = m.project_point3(Vec3::new(0.0, 0.0, -100.0));
        assert!(approx(near.z, 0.0));
        assert!(approx(far.z, 1.0));
    }

    #[test]
    fn perspective_maps_frustum_corner_to_ndc_corner() {
        let p = Projection::default();
        let b = p.bounds(ProjectionMode::Perspective, VP);
        let m = b.to_matrix();
        let corner = m.project_point3(Vec3::new(b.right, b.top, -b.near));
        assert!(approx(corner.x, 1.0));
        assert!(approx(corner.y, 1.0));
    }

    #[test]
    fn orthographic_maps_bounds_to_ndc() {
        let m = Projection::default().matrix(ProjectionMode::Orthographic, VP);
        let corner = m.project_point3(Vec3::new(-6.666_667, 5.0, 10.0));
        assert!(approx(corner.x, -1.0));
        assert!(approx(corner.y, 1.0));
        assert!(approx(corner.z, 0.0));

        let back = m.project_point3(Vec3::new(0.0, 0.0, -10.0));
        assert!(approx(back.z, 1.0));
    }

    #[test]
    fn view_without_rotation_pushes_scene_back() {
        let v = camera_view(0.0, 0.0);
        let p = v.transform_point3(Vec3::ZERO);
        assert!(approx(p.z, -SCENE_DISTANCE));
        assert!(approx(p.x, 0.0) && approx(p.y, 0.0));
    }

    #[test]
    fn yaw_rotates_world_opposite_to_camera() {
        // A quarter turn of yaw swings the scene from -Z round to +X.
        let v = camera_view(90.0, 0.0);
        let p = v.transform_point3(Vec3::ZERO);
        assert!(approx(p.x, SCENE_DISTANCE));
        assert!(approx(p.z, 0.0));
    }

    #[test]
    fn pitch_tilts_scene_vertically() {
        let v = camera_view(0.0, 90.0);
        let p = v.transform_point3(Vec3::ZERO);
        assert!(approx(p.y, -SCENE_DISTANCE));
        assert!(approx(p.z, 0.0));
    }
}
