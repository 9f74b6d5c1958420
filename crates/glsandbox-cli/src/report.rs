//! Query results, printed as text or JSON.

use glsandbox_core::glsandbox_bounds::Aabb;
use glsandbox_core::glsandbox_frustum::Frustum;
use glsandbox_core::glsandbox_math::Point3;
use glsandbox_core::glsandbox_raycast::Ray;
use glsandbox_core::{Scene, ScenePick};
use serde::Serialize;

fn xyz(p: &Point3) -> [f32; 3] {
    [p.x, p.y, p.z]
}

/// Serializable form of an [`Aabb`]; `None` for an empty box.
#[derive(Debug, Clone, Serialize)]
pub struct BoxReport {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoxReport {
    fn from_aabb(aabb: &Aabb) -> Option<Self> {
        (!aabb.is_empty()).then(|| Self {
            min: xyz(&aabb.min),
            max: xyz(&aabb.max),
        })
    }
}

fn fmt_box(b: &Option<BoxReport>) -> String {
    match b {
        Some(b) => format!(
            "[{:.3}, {:.3}, {:.3}] .. [{:.3}, {:.3}, {:.3}]",
            b.min[0], b.min[1], b.min[2], b.max[0], b.max[1], b.max[2]
        ),
        None => "empty".to_string(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ObjectBounds {
    pub name: String,
    pub triangles: usize,
    pub local: Option<BoxReport>,
    pub world: Option<BoxReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoundsReport {
    pub objects: Vec<ObjectBounds>,
    pub scene: Option<BoxReport>,
}

impl BoundsReport {
    pub fn new(scene: &Scene) -> Self {
        let objects = scene
            .objects()
            .iter()
            .map(|o| ObjectBounds {
                name: o.name().to_string(),
                triangles: o.mesh().num_triangles(),
                local: BoxReport::from_aabb(o.local_bounds()),
                world: BoxReport::from_aabb(o.world_bounds()),
            })
            .collect();
        Self {
            objects,
            scene: BoxReport::from_aabb(&scene.bounds()),
        }
    }

    pub fn print(&self) {
        for o in &self.objects {
            println!("{} ({} triangles)", o.name, o.triangles);
            println!("  local: {}", fmt_box(&o.local));
            println!("  world: {}", fmt_box(&o.world));
        }
        println!("scene: {}", fmt_box(&self.scene));
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ObjectVisibility {
    pub name: String,
    pub visible: bool,
    /// First plane that rejects the object, if culled.
    pub culled_by: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CullReport {
    pub objects: Vec<ObjectVisibility>,
    pub visible: Vec<usize>,
}

impl CullReport {
    pub fn new(scene: &Scene, frustum: &Frustum) -> Self {
        let objects = scene
            .objects()
            .iter()
            .map(|o| {
                let culled_by = frustum.culling_plane(o.world_bounds());
                ObjectVisibility {
                    name: o.name().to_string(),
                    visible: culled_by.is_none(),
                    culled_by: culled_by.map(|p| p.name()),
                }
            })
            .collect();
        Self {
            objects,
            visible: scene.visible(frustum),
        }
    }

    pub fn print(&self) {
        for o in &self.objects {
            match o.culled_by {
                None => println!("{}: visible", o.name),
                Some(plane) => println!("{}: culled ({plane} plane)", o.name),
            }
        }
        println!("{} of {} visible", self.visible.len(), self.objects.len());
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RayReport {
    pub screen: [f64; 2],
    pub origin: [f32; 3],
    pub direction: [f32; 3],
}

impl RayReport {
    pub fn new(screen_x: f64, screen_y: f64, ray: &Ray) -> Self {
        Self {
            screen: [screen_x, screen_y],
            origin: xyz(&ray.origin),
            direction: [ray.direction.x, ray.direction.y, ray.direction.z],
        }
    }

    pub fn print(&self) {
        println!("pixel ({}, {})", self.screen[0], self.screen[1]);
        println!(
            "  origin:    [{:.4}, {:.4}, {:.4}]",
            self.origin[0], self.origin[1], self.origin[2]
        );
        println!(
            "  direction: [{:.4}, {:.4}, {:.4}]",
            self.direction[0], self.direction[1], self.direction[2]
        );
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PickHit {
    pub object: usize,
    pub name: String,
    pub triangle: usize,
    pub t: f32,
    pub u: f32,
    pub v: f32,
    pub point: [f32; 3],
    /// World-space corners of the hit triangle.
    pub corners: Option<[[f32; 3]; 3]>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PickReport {
    pub ray: RayReport,
    pub hit: Option<PickHit>,
}

impl PickReport {
    pub fn new(scene: &Scene, ray_report: RayReport, ray: &Ray, pick: Option<ScenePick>) -> Self {
        let hit = pick.map(|p| PickHit {
            object: p.object,
            name: scene
                .get(p.object)
                .map(|o| o.name().to_string())
                .unwrap_or_default(),
            triangle: p.hit.tri_index,
            t: p.hit.t,
            u: p.hit.u,
            v: p.hit.v,
            point: xyz(&p.hit.point(ray)),
            corners: scene.picked_triangle(&p).map(|c| c.map(|v| xyz(&v))),
        });
        Self {
            ray: ray_report,
            hit,
        }
    }

    pub fn print(&self) {
        match &self.hit {
            Some(h) => {
                println!(
                    "hit {} (#{}) triangle {} at t = {:.4}, uv = ({:.4}, {:.4}), point [{:.4}, {:.4}, {:.4}]",
                    h.name, h.object, h.triangle, h.t, h.u, h.v, h.point[0], h.point[1], h.point[2]
                );
                if let Some(corners) = &h.corners {
                    for c in corners {
                        println!("  corner [{:.4}, {:.4}, {:.4}]", c[0], c[1], c[2]);
                    }
                }
            }
            None => println!(
                "no hit at pixel ({}, {})",
                self.ray.screen[0], self.ray.screen[1]
            ),
        }
    }
}
