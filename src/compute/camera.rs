//! Orthographic camera for viewing the voxel box.
//!
//! Elevation and azimuth follow the usual plotting convention: azimuth is
//! measured in the XY plane from +X towards +Y, elevation lifts the eye
//! above that plane. The eye looks at the box from the direction
//! `(cos e cos a, cos e sin a, sin e)`.

use glam::{Vec2, Vec3};

use crate::schema::PresentationConfig;

/// Camera basis plus the per-axis scaling from grid cells to world units.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Unit vector pointing from the scene towards the viewer.
    pub eye: Vec3,
    /// Screen right in world space.
    pub right: Vec3,
    /// Screen up in world space.
    pub up: Vec3,
    /// Grid-to-world scale per axis.
    pub scale: Vec3,
}

impl Camera {
    /// Build a camera from angles in degrees.
    ///
    /// `extent` is the grid size in cells; each axis is normalized to its
    /// `box_aspect` entry, and Z is then multiplied by `z_scale`.
    pub fn new(
        elevation: f32,
        azimuth: f32,
        box_aspect: [f32; 3],
        z_scale: f32,
        extent: [usize; 3],
    ) -> Self {
        let (se, ce) = elevation.to_radians().sin_cos();
        let (sa, ca) = azimuth.to_radians().sin_cos();

        let eye = Vec3::new(ce * ca, ce * sa, se);
        let right = Vec3::new(-sa, ca, 0.0);
        let up = eye.cross(right).normalize();

        let scale = Vec3::new(
            box_aspect[0] / extent[0].max(1) as f32,
            box_aspect[1] / extent[1].max(1) as f32,
            box_aspect[2] * z_scale / extent[2].max(1) as f32,
        );

        Self {
            eye,
            right,
            up,
            scale,
        }
    }

    /// Camera described by a presentation config and grid extent.
    pub fn from_presentation(p: &PresentationConfig, extent: [usize; 3]) -> Self {
        Self::new(p.elevation, p.azimuth, p.box_aspect, p.z_scale, extent)
    }

    /// Grid coordinates to world coordinates.
    #[inline]
    pub fn world(&self, p: Vec3) -> Vec3 {
        p * self.scale
    }

    /// Project a grid-space point onto the view plane (Y up).
    #[inline]
    pub fn project(&self, p: Vec3) -> Vec2 {
        let w = self.world(p);
        Vec2::new(w.dot(self.right), w.dot(self.up))
    }

    /// Distance towards the viewer; larger values are nearer.
    #[inline]
    pub fn depth(&self, p: Vec3) -> f32 {
        self.world(p).dot(self.eye)
    }

    /// Grid-space direction to world-space unit vector, for shading normals.
    #[inline]
    pub fn direction(&self, n: Vec3) -> Vec3 {
        // Normals transform with the inverse scale.
        (n / self.scale).normalize_or_zero()
    }
}

/// Maps view-plane coordinates onto pixel coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    /// Pixels per view-plane unit.
    pub scale: f32,
    /// Pixel position of the view-plane origin.
    pub origin: Vec2,
}

impl Viewport {
    /// Fit the projected points into a pixel rectangle, preserving aspect.
    ///
    /// `rect` is `(left, top, width, height)` in pixels.
    pub fn fit(points: &[Vec2], rect: (f32, f32, f32, f32)) -> Self {
        let (left, top, width, height) = rect;
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        for p in points {
            min = min.min(*p);
            max = max.max(*p);
        }
        if points.is_empty() {
            min = Vec2::ZERO;
            max = Vec2::ZERO;
        }

        let span = (max - min).max(Vec2::splat(f32::EPSILON));
        let scale = (width / span.x).min(height / span.y);

        // Center of the bounds lands on the center of the rect.
        let mid = (min + max) * 0.5;
        let center = Vec2::new(left + width * 0.5, top + height * 0.5);
        let origin = Vec2::new(center.x - mid.x * scale, center.y + mid.y * scale);

        Self { scale, origin }
    }

    /// View-plane point to pixel coordinates (Y down).
    #[inline]
    pub fn to_pixel(&self, p: Vec2) -> Vec2 {
        Vec2::new(self.origin.x + p.x * self.scale, self.origin.y - p.y * self.scale)
    }
}

/// The eight corners of a box of the given extent, in grid space.
pub fn box_corners(extent: [usize; 3]) -> [Vec3; 8] {
    let (x, y, z) = (extent[0] as f32, extent[1] as f32, extent[2] as f32);
    [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(x, 0.0, 0.0),
        Vec3::new(0.0, y, 0.0),
        Vec3::new(x, y, 0.0),
        Vec3::new(0.0, 0.0, z),
        Vec3::new(x, 0.0, z),
        Vec3::new(0.0, y, z),
        Vec3::new(x, y, z),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_camera() -> Camera {
        Camera::new(25.0, 135.0, [1.5, 1.5, 1.0], 0.7, [5, 5, 5])
    }

    #[test]
    fn test_basis_orthonormal() {
        let cam = default_camera();
        assert!((cam.eye.length() - 1.0).abs() < 1e-5);
        assert!((cam.right.length() - 1.0).abs() < 1e-5);
        assert!((cam.up.length() - 1.0).abs() < 1e-5);
        assert!(cam.eye.dot(cam.right).abs() < 1e-5);
        assert!(cam.eye.dot(cam.up).abs() < 1e-5);
        assert!(cam.right.dot(cam.up).abs() < 1e-5);
    }

    #[test]
    fn test_z_projects_upward() {
        let cam = default_camera();
        let bottom = cam.project(Vec3::new(2.5, 2.5, 0.0));
        let top = cam.project(Vec3::new(2.5, 2.5, 5.0));
        assert!(top.y > bottom.y);
        assert!((top.x - bottom.x).abs() < 1e-5);
    }

    #[test]
    fn test_nearest_corner() {
        let cam = default_camera();
        let nearest = box_corners([5, 5, 5])
            .into_iter()
            .max_by(|a, b| cam.depth(*a).total_cmp(&cam.depth(*b)))
            .unwrap();
        assert_eq!(nearest, Vec3::new(0.0, 5.0, 5.0));
    }

    #[test]
    fn test_azimuth_zero_looks_down_x() {
        let cam = Camera::new(0.0, 0.0, [1.0, 1.0, 1.0], 1.0, [1, 1, 1]);
        assert!((cam.eye - Vec3::X).length() < 1e-5);
        assert!((cam.right - Vec3::Y).length() < 1e-5);
        assert!((cam.up - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_z_scale_compresses_height() {
        let flat = Camera::new(0.0, 0.0, [1.0, 1.0, 1.0], 0.7, [5, 5, 5]);
        let full = Camera::new(0.0, 0.0, [1.0, 1.0, 1.0], 1.0, [5, 5, 5]);
        let top = Vec3::new(0.0, 0.0, 5.0);
        assert!((flat.project(top).y - 0.7).abs() < 1e-5);
        assert!((full.project(top).y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_viewport_fit_centers_points() {
        let points = [Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0)];
        let vp = Viewport::fit(&points, (0.0, 0.0, 200.0, 100.0));

        assert!((vp.scale - 50.0).abs() < 1e-4);
        let c = vp.to_pixel(Vec2::ZERO);
        assert!((c.x - 100.0).abs() < 1e-4);
        assert!((c.y - 50.0).abs() < 1e-4);

        // View-plane up maps to pixel rows above.
        let top = vp.to_pixel(Vec2::new(0.0, 1.0));
        assert!((top.y - 0.0).abs() < 1e-4);
    }
}
