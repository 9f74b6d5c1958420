//! Built-in meshes.

use crate::TriangleMesh;

/// Axis-aligned cube of edge 1 centered on the origin.
///
/// Vertices 0-3 form the `z = -0.5` face counter-clockwise from
/// `(-,-)`, vertices 4-7 the `z = +0.5` face in the same order. The 12
/// triangles cover the faces -Z, +Z, -X, +X, -Y, +Y, two per face.
#[rustfmt::skip]
pub fn unit_cube() -> TriangleMesh {
    let vertices = vec![
        -0.5, -0.5, -0.5,   0.5, -0.5, -0.5,
         0.5,  0.5, -0.5,  -0.5,  0.5, -0.5,
        -0.5, -0.5,  0.5,   0.5, -0.5,  0.5,
         0.5,  0.5,  0.5,  -0.5,  0.5,  0.5,
    ];
    let indices = vec![
        0, 1, 2,  2, 3, 0,
        5, 4, 7,  7, 6, 5,
        4, 0, 3,  3, 7, 4,
        1, 5, 6,  6, 2, 1,
        4, 5, 1,  1, 0, 4,
        3, 2, 6,  6, 7, 3,
    ];
    TriangleMesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glsandbox_math::{Point3, Vec3};
    use glsandbox_raycast::{raycast_mesh, Ray};

    #[test]
    fn test_unit_cube_shape() {
        let cube = unit_cube();
        assert_eq!(cube.num_vertices(), 8);
        assert_eq!(cube.num_triangles(), 12);
        assert!(cube.view().is_ok());
        let b = cube.bounds();
        assert_eq!(b.min, Point3::new(-0.5, -0.5, -0.5));
        assert_eq!(b.max, Point3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_unit_cube_face_order() {
        let cube = unit_cube();
        // (origin, direction, expected face pair)
        let cases = [
            (Point3::new(0.1, 0.2, -5.0), Vec3::z(), 0),
            (Point3::new(0.1, 0.2, 5.0), -Vec3::z(), 1),
            (Point3::new(-5.0, 0.1, 0.2), Vec3::x(), 2),
            (Point3::new(5.0, 0.1, 0.2), -Vec3::x(), 3),
            (Point3::new(0.1, -5.0, 0.2), Vec3::y(), 4),
            (Point3::new(0.1, 5.0, 0.2), -Vec3::y(), 5),
        ];
        for (origin, dir, face) in cases {
            let hit = raycast_mesh(&Ray::new(origin, dir), &cube.vertices, &cube.indices).unwrap();
            assert_eq!(hit.tri_index / 2, face, "ray from {origin:?}");
            assert!((hit.t - 4.5).abs() < 1e-5);
        }
    }
}
