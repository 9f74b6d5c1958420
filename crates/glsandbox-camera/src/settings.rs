//! Serializable camera settings.

use serde::{Deserialize, Serialize};

/// Orbit camera parameters as stored in scene files.
///
/// Every field is optional when deserializing; missing fields take the
/// values of [`OrbitSettings::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    /// Orbit target `[x, y, z]`.
    pub target: [f32; 3],
    /// Distance from target to eye.
    pub distance: f32,
    /// Yaw in degrees.
    pub yaw_deg: f32,
    /// Pitch in degrees.
    pub pitch_deg: f32,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            target: [0.0, 0.0, 0.0],
            distance: 5.0,
            yaw_deg: 0.0,
            pitch_deg: 0.0,
            fov_y_deg: 60.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}
