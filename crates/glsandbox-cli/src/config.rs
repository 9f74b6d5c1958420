//! TOML scene files.

use std::path::Path;

use anyhow::{bail, Context, Result};
use glsandbox_core::glsandbox_camera::{OrbitCamera, OrbitSettings};
use glsandbox_core::glsandbox_math::Transform;
use glsandbox_core::{primitives, Scene, TriangleMesh};
use serde::{Deserialize, Serialize};

/// Framebuffer size used for screen-space queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// One object in the scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectConfig {
    pub name: String,
    /// Built-in mesh name. Mutually exclusive with `positions`/`indices`.
    pub mesh: Option<String>,
    pub positions: Option<Vec<f32>>,
    pub indices: Option<Vec<u32>>,
    pub translate: [f32; 3],
    pub scale: [f32; 3],
    /// Euler angles in degrees, applied X, then Y, then Z.
    pub rotate_deg: [f32; 3],
}

impl Default for ObjectConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            mesh: None,
            positions: None,
            indices: None,
            translate: [0.0; 3],
            scale: [1.0; 3],
            rotate_deg: [0.0; 3],
        }
    }
}

impl ObjectConfig {
    /// Object-to-world transform: scale, then rotate X, Y, Z, then translate.
    pub fn transform(&self) -> Transform {
        let [tx, ty, tz] = self.translate;
        let [sx, sy, sz] = self.scale;
        let [rx, ry, rz] = self.rotate_deg;
        Transform::translation(tx, ty, tz)
            .then(&Transform::rotation_z(rz.to_radians()))
            .then(&Transform::rotation_y(ry.to_radians()))
            .then(&Transform::rotation_x(rx.to_radians()))
            .then(&Transform::scale(sx, sy, sz))
    }

    /// Resolve the mesh source into buffers.
    pub fn build_mesh(&self) -> Result<TriangleMesh> {
        match (&self.mesh, &self.positions, &self.indices) {
            (Some(name), None, None) => match name.as_str() {
                "cube" => Ok(primitives::unit_cube()),
                other => bail!("object `{}`: unknown built-in mesh `{other}`", self.name),
            },
            (None, Some(positions), Some(indices)) => {
                Ok(TriangleMesh::from_buffers(positions.clone(), indices.clone()))
            }
            (None, Some(_), None) | (None, None, Some(_)) => {
                bail!("object `{}`: `positions` and `indices` must be given together", self.name)
            }
            (None, None, None) => {
                bail!("object `{}`: needs `mesh` or `positions` + `indices`", self.name)
            }
            (Some(_), _, _) => {
                bail!("object `{}`: `mesh` cannot be combined with explicit buffers", self.name)
            }
        }
    }
}

/// Contents of a scene file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub viewport: ViewportConfig,
    pub camera: OrbitSettings,
    pub objects: Vec<ObjectConfig>,
}

impl SceneConfig {
    /// Read and validate a scene file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scene file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("invalid scene file {}", path.display()))
    }

    /// Parse and validate scene TOML.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SceneConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the camera and scene would otherwise accept silently.
    pub fn validate(&self) -> Result<()> {
        let cam = &self.camera;
        if !(cam.fov_y_deg > 0.0 && cam.fov_y_deg < 180.0) {
            bail!("camera.fov_y_deg must be in (0, 180), got {}", cam.fov_y_deg);
        }
        if !(cam.near > 0.0 && cam.far > cam.near) {
            bail!(
                "camera clip range must satisfy 0 < near < far, got near = {}, far = {}",
                cam.near,
                cam.far
            );
        }
        for (i, obj) in self.objects.iter().enumerate() {
            if obj.name.is_empty() {
                bail!("object #{i} has no name");
            }
            if self.objects[..i].iter().any(|o| o.name == obj.name) {
                bail!("duplicate object name `{}`", obj.name);
            }
        }
        Ok(())
    }

    /// Camera described by the file, sized to its viewport.
    pub fn camera(&self) -> OrbitCamera {
        let mut cam = OrbitCamera::from_settings(&self.camera);
        cam.set_viewport(self.viewport.width, self.viewport.height);
        cam
    }

    /// Build the scene, optionally with per-object BVHs.
    pub fn build_scene(&self, use_bvh: bool) -> Result<Scene> {
        let mut scene = Scene::new();
        if use_bvh {
            scene.enable_bvh()?;
        }
        for obj in &self.objects {
            let mesh = obj.build_mesh()?;
            scene.add(obj.name.clone(), mesh, obj.transform())?;
        }
        log::info!("loaded {} objects", scene.len());
        Ok(scene)
    }
}
