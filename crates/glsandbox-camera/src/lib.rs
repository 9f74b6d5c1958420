#![warn(missing_docs)]

//! Orbit camera for the glsandbox viewer.
//!
//! The camera circles a target point at a given distance, steered by yaw and
//! pitch angles in degrees. At yaw 0 and pitch 0 it sits on the `+Z` axis of
//! the target looking down `-Z`; positive yaw swings it toward `+X`, positive
//! pitch lifts it toward `+Y`. Matrices follow OpenGL conventions.

mod settings;

pub use settings::OrbitSettings;

use glsandbox_math::{Mat4, Point3, Transform, Vec3};

/// Pitch limit in degrees, keeping the view direction off the up axis.
pub const MAX_PITCH_DEG: f32 = 89.0;
/// Smallest allowed orbit distance.
pub const MIN_DISTANCE: f32 = 0.01;
/// Largest allowed orbit distance.
pub const MAX_DISTANCE: f32 = 1e6;
/// Default tumble sensitivity in degrees per pixel.
pub const DEFAULT_TUMBLE_SENS: f32 = 0.2;
/// Default dolly factor per wheel notch.
pub const DEFAULT_DOLLY_SENS: f32 = 1.2;

fn clamp_pitch(pitch_deg: f32) -> f32 {
    pitch_deg.clamp(-MAX_PITCH_DEG, MAX_PITCH_DEG)
}

/// Camera orbiting a target point.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    target: Point3,
    distance: f32,
    yaw_deg: f32,
    pitch_deg: f32,
    fov_y_deg: f32,
    near: f32,
    far: f32,
    fb_width: u32,
    fb_height: u32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Point3::origin(),
            distance: 5.0,
            yaw_deg: 0.0,
            pitch_deg: 0.0,
            fov_y_deg: 60.0,
            near: 0.1,
            far: 1000.0,
            fb_width: 1,
            fb_height: 1,
        }
    }
}

impl OrbitCamera {
    /// Camera with default settings and a 1x1 viewport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a camera from serialized settings. Clamps are applied as if
    /// each value had been set through its setter.
    pub fn from_settings(settings: &OrbitSettings) -> Self {
        let mut cam = Self::new();
        let [x, y, z] = settings.target;
        cam.set_target(Point3::new(x, y, z));
        cam.set_distance(settings.distance);
        cam.set_angles(settings.yaw_deg, settings.pitch_deg);
        cam.set_lens(settings.fov_y_deg, settings.near, settings.far);
        cam
    }

    /// Snapshot of the current settings.
    pub fn settings(&self) -> OrbitSettings {
        OrbitSettings {
            target: [self.target.x, self.target.y, self.target.z],
            distance: self.distance,
            yaw_deg: self.yaw_deg,
            pitch_deg: self.pitch_deg,
            fov_y_deg: self.fov_y_deg,
            near: self.near,
            far: self.far,
        }
    }

    /// Set the framebuffer size in pixels. Zero is raised to 1.
    pub fn set_viewport(&mut self, fb_width: u32, fb_height: u32) {
        self.fb_width = fb_width.max(1);
        self.fb_height = fb_height.max(1);
    }

    /// Set vertical field of view (degrees) and clip distances.
    pub fn set_lens(&mut self, fov_y_deg: f32, near: f32, far: f32) {
        self.fov_y_deg = fov_y_deg;
        self.near = near;
        self.far = far;
    }

    /// Set the point the camera orbits.
    pub fn set_target(&mut self, target: Point3) {
        self.target = target;
    }

    /// Set the orbit distance, clamped to `[MIN_DISTANCE, MAX_DISTANCE]`.
    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Set yaw and pitch in degrees. Pitch is clamped to `±MAX_PITCH_DEG`.
    pub fn set_angles(&mut self, yaw_deg: f32, pitch_deg: f32) {
        self.yaw_deg = yaw_deg;
        self.pitch_deg = clamp_pitch(pitch_deg);
    }

    /// Rotate by a mouse drag of `(dx, dy)` pixels at `sens` degrees per
    /// pixel.
    pub fn tumble(&mut self, dx_px: f32, dy_px: f32, sens: f32) {
        self.yaw_deg += dx_px * sens;
        self.pitch_deg = clamp_pitch(self.pitch_deg + dy_px * sens);
    }

    /// Zoom by one wheel step. A positive `wheel_y` moves closer by a factor
    /// of `1 / sens`, a negative one moves away by `sens`; zero does nothing.
    pub fn dolly(&mut self, wheel_y: f32, sens: f32) {
        if wheel_y == 0.0 {
            return;
        }
        let factor = if wheel_y > 0.0 { 1.0 / sens } else { sens };
        self.set_distance(self.distance * factor);
    }

    /// Orbit target.
    pub fn target(&self) -> Point3 {
        self.target
    }

    /// Orbit distance.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// `(yaw, pitch)` in degrees.
    pub fn angles(&self) -> (f32, f32) {
        (self.yaw_deg, self.pitch_deg)
    }

    /// Framebuffer size in pixels.
    pub fn viewport(&self) -> (u32, u32) {
        (self.fb_width, self.fb_height)
    }

    /// Width over height of the viewport.
    pub fn aspect(&self) -> f32 {
        self.fb_width as f32 / self.fb_height as f32
    }

    /// Eye position in world space.
    pub fn position(&self) -> Point3 {
        let yaw = self.yaw_deg.to_radians();
        let pitch = self.pitch_deg.to_radians();
        let (sy, cy) = yaw.sin_cos();
        let (sp, cp) = pitch.sin_cos();
        let offset = Vec3::new(sy * cp, sp, cy * cp);
        self.target + offset * self.distance
    }

    /// World-to-view matrix, `+Y` up.
    pub fn view(&self) -> Mat4 {
        Transform::look_at(&self.position(), &self.target, &Vec3::y()).matrix
    }

    /// Perspective projection for the current viewport.
    pub fn proj(&self) -> Mat4 {
        Transform::perspective(self.fov_y_deg.to_radians(), self.aspect(), self.near, self.far)
            .matrix
    }

    /// `proj * view`.
    pub fn view_proj(&self) -> Mat4 {
        self.proj() * self.view()
    }

    /// Inverse of [`view_proj`](Self::view_proj).
    ///
    /// `None` if it is singular or the lens is degenerate (e.g. `near == far`).
    pub fn inv_view_proj(&self) -> Option<Mat4> {
        Transform::from_matrix(self.view_proj())
            .inverse()
            .map(|t| t.matrix)
    }
}
