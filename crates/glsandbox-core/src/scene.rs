//! A flat list of meshes placed in the world, with culling and picking.

use glsandbox_bounds::{transform_aabb, Aabb};
use glsandbox_camera::OrbitCamera;
use glsandbox_frustum::{visible_indices, Frustum};
use glsandbox_math::{Point3, Transform};
use glsandbox_raycast::{raycast_mesh, screen_ray_from_inv_vp, MeshBvh, Ray, RayHit};

use crate::error::{Result, SceneError};
use crate::TriangleMesh;

/// A mesh placed in the world by a transform.
#[derive(Debug, Clone)]
pub struct SceneObject {
    name: String,
    mesh: TriangleMesh,
    transform: Transform,
    local_bounds: Aabb,
    world_bounds: Aabb,
    world_mesh: TriangleMesh,
    bvh: Option<MeshBvh>,
}

impl SceneObject {
    /// Object name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mesh in object space.
    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    /// Object-to-world transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Bounds of the mesh in object space.
    pub fn local_bounds(&self) -> &Aabb {
        &self.local_bounds
    }

    /// Object-space bounds refitted through the transform. Conservative:
    /// may be larger than the tight bounds of the world-space vertices.
    pub fn world_bounds(&self) -> &Aabb {
        &self.world_bounds
    }

    /// Mesh with vertices baked into world space.
    pub fn world_mesh(&self) -> &TriangleMesh {
        &self.world_mesh
    }

    /// True once a BVH has been built for this object.
    pub fn has_bvh(&self) -> bool {
        self.bvh.is_some()
    }

    fn raycast(&self, ray: &Ray) -> Option<RayHit> {
        match &self.bvh {
            Some(bvh) => bvh.raycast(ray),
            None => raycast_mesh(ray, &self.world_mesh.vertices, &self.world_mesh.indices),
        }
    }

    /// World-space corners of triangle `tri_index`, e.g. the triangle of a
    /// [`RayHit`]. `None` if the index is out of range.
    pub fn world_triangle(&self, tri_index: usize) -> Option<[Point3; 3]> {
        let view = self.world_mesh.view().ok()?;
        (tri_index < view.triangle_count()).then(|| view.triangle(tri_index))
    }

    fn build_bvh(&mut self) -> Result<()> {
        let view = self.world_mesh.view().map_err(|source| SceneError::InvalidMesh {
            name: self.name.clone(),
            source,
        })?;
        self.bvh = Some(MeshBvh::build(&view));
        Ok(())
    }
}

/// The nearest object hit by a picking ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenePick {
    /// Index of the object in the scene.
    pub object: usize,
    /// Hit on the object's world-space mesh.
    pub hit: RayHit,
}

/// Objects in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    use_bvh: bool,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object and return its index.
    ///
    /// Fails if the mesh buffers are malformed or the transform is not
    /// finite. Meshes without triangles are accepted but can never be picked.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        mesh: TriangleMesh,
        transform: Transform,
    ) -> Result<usize> {
        let name = name.into();

        if let Err(source) = mesh.view() {
            return Err(SceneError::InvalidMesh { name, source });
        }
        if transform.matrix.iter().any(|v| !v.is_finite()) {
            return Err(SceneError::NonFiniteTransform(name));
        }
        if mesh.is_empty() {
            log::warn!("object `{name}` has no triangles");
        }

        let local_bounds = mesh.bounds();
        let world_bounds = transform_aabb(&local_bounds, &transform.matrix);
        let world_mesh = mesh.transformed(&transform.matrix);

        let mut object = SceneObject {
            name,
            mesh,
            transform,
            local_bounds,
            world_bounds,
            world_mesh,
            bvh: None,
        };
        if self.use_bvh {
            object.build_bvh()?;
        }

        log::debug!(
            "added object `{}`: {} triangles",
            object.name,
            object.mesh.num_triangles()
        );

        self.objects.push(object);
        Ok(self.objects.len() - 1)
    }

    /// Build a BVH for every object, now and for objects added later.
    /// Picking results do not change, only their cost.
    ///
    /// Fails with [`SceneError::InvalidMesh`] if an object's world mesh is
    /// malformed, which [`add`](Self::add) already rules out.
    pub fn enable_bvh(&mut self) -> Result<()> {
        self.use_bvh = true;
        for object in self.objects.iter_mut().filter(|o| o.bvh.is_none()) {
            object.build_bvh()?;
        }
        Ok(())
    }

    /// All objects in insertion order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Object at `index`.
    pub fn get(&self, index: usize) -> Option<&SceneObject> {
        self.objects.get(index)
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True if the scene has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// World bounds of every object.
    pub fn world_bounds(&self) -> Vec<Aabb> {
        self.objects.iter().map(|o| o.world_bounds).collect()
    }

    /// Bounds of the whole scene; empty when no object has vertices.
    pub fn bounds(&self) -> Aabb {
        self.objects
            .iter()
            .fold(Aabb::empty(), |acc, o| acc.merge(&o.world_bounds))
    }

    /// Indices of objects whose world bounds are not culled by `frustum`.
    pub fn visible(&self, frustum: &Frustum) -> Vec<usize> {
        visible_indices(frustum, &self.world_bounds())
    }

    /// Nearest object hit by `ray`.
    ///
    /// Objects whose world bounds the ray misses, or enters beyond the best
    /// hit so far, are skipped. On equal `t` the earlier object wins.
    pub fn pick(&self, ray: &Ray) -> Option<ScenePick> {
        let mut best: Option<ScenePick> = None;

        for (object, obj) in self.objects.iter().enumerate() {
            if obj.mesh.is_empty() {
                continue;
            }
            let mut broad = obj.world_bounds;
            broad.expand(bounds_margin(&broad));
            let Some((t_enter, _)) = ray.intersect_aabb(&broad) else {
                continue;
            };
            if best.is_some_and(|b| t_enter > b.hit.t) {
                continue;
            }

            if let Some(hit) = obj.raycast(ray) {
                if best.map_or(true, |b| hit.t < b.hit.t) {
                    best = Some(ScenePick { object, hit });
                }
            }
        }

        best
    }

    /// World-space corners of the triangle hit by `pick`, for outlining.
    pub fn picked_triangle(&self, pick: &ScenePick) -> Option<[Point3; 3]> {
        self.get(pick.object)?.world_triangle(pick.hit.tri_index)
    }

    /// Pick through pixel `(screen_x, screen_y)` of `camera`'s viewport.
    ///
    /// Returns `None` when nothing is hit or the camera's view-projection
    /// matrix cannot be inverted.
    pub fn pick_screen(&self, camera: &OrbitCamera, screen_x: f64, screen_y: f64) -> Option<ScenePick> {
        let ray = screen_ray(camera, screen_x, screen_y)?;
        self.pick(&ray)
    }
}

/// World-space picking ray through a pixel of `camera`'s viewport.
pub fn screen_ray(camera: &OrbitCamera, screen_x: f64, screen_y: f64) -> Option<Ray> {
    let inv_vp = camera.inv_view_proj()?;
    let (width, height) = camera.viewport();
    Some(screen_ray_from_inv_vp(&inv_vp, screen_x, screen_y, width, height))
}

fn bounds_margin(aabb: &Aabb) -> f32 {
    let scale = [aabb.min, aabb.max]
        .iter()
        .flat_map(|p: &Point3| [p.x.abs(), p.y.abs(), p.z.abs()])
        .fold(1.0f32, f32::max);
    scale * 1e-5
}
