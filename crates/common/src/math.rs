use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Normalize `v`, returning the zero vector when `v` has zero length.
///
/// Never produces NaN for a zero input, which the movement and collision
/// code rely on when no keys are held or a push direction collapses.
pub fn normalize(v: Vec3) -> Vec3 {
    let len = v.length();
    if len > 0.0 { v * (1.0 / len) } else { Vec3::ZERO }
}

pub fn identity() -> Mat4 {
    Mat4::IDENTITY
}

/// Right-handed perspective projection with clip-space depth in -1..1.
///
/// Same layout as `Mat4::perspective_rh_gl`, spelled out so the depth terms
/// `(far+near)/(near-far)` and `2*far*near/(near-far)` are visible.
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y * 0.5).tan();
    let mut m = [0.0_f32; 16];
    m[0] = f / aspect;
    m[5] = f;
    m[10] = (far + near) / (near - far);
    m[11] = -1.0;
    m[14] = (2.0 * far * near) / (near - far);
    Mat4::from_cols_array(&m)
}

/// View matrix from the orthonormal basis `{right, true_up, -forward}`.
///
/// Degenerate input (eye == center, or forward parallel to up) yields zero
/// basis vectors instead of NaN.
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    let f = normalize(center - eye);
    let s = normalize(f.cross(up));
    let u = s.cross(f);
    #[rustfmt::skip]
    let m = [
        s.x, u.x, -f.x, 0.0,
        s.y, u.y, -f.y, 0.0,
        s.z, u.z, -f.z, 0.0,
        -s.dot(eye), -u.dot(eye), f.dot(eye), 1.0,
    ];
    Mat4::from_cols_array(&m)
}

/// Model matrix for a uniformly scaled cube: translate * scale.
pub fn model_matrix(position: Vec3, scale: f32) -> Mat4 {
    Mat4::from_translation(position) * Mat4::from_scale(Vec3::splat(scale))
}

/// Final clip transform. `view_projection` must already be projection * view.
pub fn mvp(view_projection: Mat4, model: Mat4) -> Mat4 {
    view_projection * model
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Cube of edge `size` with its minimum corner at `min`.
    pub fn from_min_size(min: Vec3, size: f32) -> Self {
        Self {
            min,
            max: min + Vec3::splat(size),
        }
    }

    /// Point of the box closest to `p` (component-wise clamp).
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
            p.z.clamp(self.min.z, self.max.z),
        )
    }

    /// Depth by which a sphere overlaps this box, or 0 when it doesn't.
    pub fn sphere_penetration(&self, center: Vec3, radius: f32) -> f32 {
        let dist = (center - self.closest_point(center)).length();
        (radius - dist).max(0.0)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}
