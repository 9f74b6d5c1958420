//! End-to-end checks of the viewer's spatial queries through the facade.

use glsandbox_core::glsandbox_bounds::{compute_aabb, triangle_outline_vertices, Aabb};
use glsandbox_core::glsandbox_camera::OrbitCamera;
use glsandbox_core::glsandbox_frustum::{aabb_outside_frustum, extract_frustum, FrustumPlane};
use glsandbox_core::glsandbox_math::{Point3, Transform, Vec3};
use glsandbox_core::glsandbox_raycast::{
    project_to_screen, raycast_mesh, screen_ray_from_inv_vp, MeshBvh, Ray,
};
use glsandbox_core::{primitives, screen_ray, Scene, TriangleMesh};

fn camera(yaw: f32, pitch: f32) -> OrbitCamera {
    let mut cam = OrbitCamera::new();
    cam.set_viewport(1280, 720);
    cam.set_lens(60.0, 0.1, 100.0);
    cam.set_distance(6.0);
    cam.set_angles(yaw, pitch);
    cam
}

#[test]
fn test_aabb_example_points() {
    let b = compute_aabb(&[-1.0, 2.0, 3.0, 4.0, -2.0, 0.0]);
    assert_eq!(b.min, Point3::new(-1.0, -2.0, 0.0));
    assert_eq!(b.max, Point3::new(4.0, 2.0, 3.0));
    assert!(compute_aabb(&[]).min.x > compute_aabb(&[]).max.x);
}

#[test]
fn test_box_around_target_visible_from_every_angle() {
    let target_box = Aabb::new(Point3::new(-0.1, -0.1, -0.1), Point3::new(0.1, 0.1, 0.1));
    for yaw in (0..360).step_by(30) {
        for pitch in [-80.0, -30.0, 0.0, 45.0, 89.0] {
            let cam = camera(yaw as f32, pitch);
            let frustum = extract_frustum(&cam.view_proj());
            assert!(
                !aabb_outside_frustum(&frustum, &target_box),
                "yaw {yaw} pitch {pitch}"
            );
        }
    }
}

#[test]
fn test_box_behind_far_plane_culled() {
    let cam = camera(0.0, 0.0);
    let frustum = extract_frustum(&cam.view_proj());
    // camera at z = 6 looks down -Z; far plane sits at z = -94
    let far_box = Aabb::new(Point3::new(-1.0, -1.0, -201.0), Point3::new(1.0, 1.0, -199.0));
    assert!(aabb_outside_frustum(&frustum, &far_box));
    assert_eq!(frustum.culling_plane(&far_box), Some(FrustumPlane::Far));
}

#[test]
fn test_screen_round_trip_from_orbit_camera() {
    let cam = camera(40.0, 25.0);
    let vp = cam.view_proj();
    let inv = cam.inv_view_proj().unwrap();
    let (w, h) = cam.viewport();

    for p in [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.7, -0.4, 0.2),
        Point3::new(-1.5, 1.0, -2.0),
    ] {
        let (sx, sy) = project_to_screen(&vp, &p, w, h).unwrap();
        let ray = screen_ray_from_inv_vp(&inv, sx, sy, w, h);
        // distance from p to the ray's line
        let to_p = p - ray.origin;
        let along = to_p.dot(&ray.direction);
        assert!(along > 0.0);
        let off_axis = (to_p - ray.direction * along).norm();
        assert!(off_axis < 1e-3, "{p:?} is {off_axis} from the ray");
    }
}

#[test]
fn test_pick_cube_through_camera() {
    let mut scene = Scene::new();
    scene
        .add("left", primitives::unit_cube(), Transform::translation(-2.0, 0.0, 0.0))
        .unwrap();
    scene
        .add("right", primitives::unit_cube(), Transform::translation(2.0, 0.0, 0.0))
        .unwrap();

    let cam = camera(0.0, 0.0);
    let vp = cam.view_proj();
    let (w, h) = cam.viewport();

    // aim slightly off the center of the right cube's front face
    let (sx, sy) = project_to_screen(&vp, &Point3::new(2.1, 0.2, 0.5), w, h).unwrap();
    let pick = scene.pick_screen(&cam, sx, sy).unwrap();
    assert_eq!(pick.object, 1);
    assert_eq!(scene.get(pick.object).unwrap().name(), "right");

    let ray = screen_ray(&cam, sx, sy).unwrap();
    let hit_point = pick.hit.point(&ray);
    assert!((hit_point - Point3::new(2.1, 0.2, 0.5)).norm() < 1e-3);

    // between the cubes there is nothing to hit
    let (sx, sy) = project_to_screen(&vp, &Point3::origin(), w, h).unwrap();
    assert!(scene.pick_screen(&cam, sx, sy).is_none());
}

#[test]
fn test_culling_scene_from_camera() {
    let mut scene = Scene::new();
    for i in 0..10 {
        scene
            .add(
                format!("cube{i}"),
                primitives::unit_cube(),
                Transform::translation(0.0, 0.0, -(i as f32) * 30.0),
            )
            .unwrap();
    }
    let cam = camera(0.0, 0.0);
    let frustum = extract_frustum(&cam.view_proj());
    // eye at z = 6, far = 100: cubes at 0, -30, -60, -90 are in range
    assert_eq!(scene.visible(&frustum), vec![0, 1, 2, 3]);
}

#[test]
fn test_linear_and_bvh_agree_on_merged_cubes() {
    let mut mesh = TriangleMesh::new();
    for i in 0..8 {
        let placed = primitives::unit_cube()
            .transformed(&Transform::translation(i as f32 * 0.75, 0.0, i as f32 * 0.1).matrix);
        mesh.merge(&placed).unwrap();
    }
    let view = mesh.view().unwrap();
    let bvh = MeshBvh::build(&view);

    for k in 0..40 {
        let x = -1.0 + k as f32 * 0.17;
        for dir in [Vec3::z(), Vec3::new(0.2, 0.1, 1.0), Vec3::new(-0.3, 0.0, 1.0)] {
            let ray = Ray::new(Point3::new(x, 0.13, -4.0), dir);
            assert_eq!(
                bvh.raycast(&ray),
                raycast_mesh(&ray, &mesh.vertices, &mesh.indices)
            );
        }
    }
}

#[test]
fn test_degenerate_lens_picks_nothing() {
    let mut scene = Scene::new();
    scene
        .add("box", primitives::unit_cube(), Transform::identity())
        .unwrap();

    let mut cam = camera(0.0, 0.0);
    cam.set_lens(60.0, 1.0, 1.0);
    assert!(cam.inv_view_proj().is_none());
    assert!(screen_ray(&cam, 640.0, 360.0).is_none());
    assert!(scene.pick_screen(&cam, 640.0, 360.0).is_none());

    // the frustum is meaningless but building it must not panic
    let frustum = extract_frustum(&cam.view_proj());
    assert!(scene.visible(&frustum).len() <= 1);
}

#[test]
fn test_outline_of_picked_triangle() {
    let mut scene = Scene::new();
    scene
        .add("box", primitives::unit_cube(), Transform::translation(0.0, 0.0, -1.0))
        .unwrap();
    let cam = camera(0.0, 0.0);
    let pick = scene.pick_screen(&cam, 650.0, 340.0).unwrap();
    let [a, b, c] = scene.picked_triangle(&pick).unwrap();

    let outline = triangle_outline_vertices(&a, &b, &c);
    assert_eq!(outline.len(), 18);
    // closed loop: the last edge ends where the first begins
    assert_eq!(&outline[15..], &outline[..3]);
    for z in outline.chunks(3).map(|p| p[2]) {
        assert!((z + 0.5).abs() < 1e-6);
    }
}
