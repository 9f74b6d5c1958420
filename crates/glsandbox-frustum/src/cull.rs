//! Batch visibility over many boxes.

use glsandbox_bounds::Aabb;
use rayon::prelude::*;

use crate::frustum::{aabb_outside_frustum, Frustum};

/// Indices of the boxes that survive culling, in ascending order.
pub fn visible_indices(frustum: &Frustum, boxes: &[Aabb]) -> Vec<usize> {
    boxes
        .iter()
        .enumerate()
        .filter(|(_, aabb)| !aabb_outside_frustum(frustum, aabb))
        .map(|(i, _)| i)
        .collect()
}

/// Parallel version of [`visible_indices`]; same result, same order.
pub fn par_visible_indices(frustum: &Frustum, boxes: &[Aabb]) -> Vec<usize> {
    boxes
        .par_iter()
        .enumerate()
        .filter(|(_, aabb)| !aabb_outside_frustum(frustum, aabb))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract_frustum;
    use glsandbox_math::{Point3, Transform, Vec3};

    fn row_of_boxes() -> Vec<Aabb> {
        // unit boxes along X from -200 to 200, all at z = 0
        (-20..=20)
            .map(|i| {
                let c = Point3::new(i as f32 * 10.0, 0.0, 0.0);
                let h = Vec3::new(0.5, 0.5, 0.5);
                Aabb::new(c - h, c + h)
            })
            .collect()
    }

    fn frustum() -> Frustum {
        let view = Transform::look_at(&Point3::new(0.0, 0.0, 20.0), &Point3::origin(), &Vec3::y());
        let proj = Transform::perspective(60f32.to_radians(), 1.0, 0.1, 100.0);
        extract_frustum(&proj.then(&view).matrix)
    }

    #[test]
    fn test_visible_indices_keeps_center() {
        let boxes = row_of_boxes();
        let visible = visible_indices(&frustum(), &boxes);
        // half-width at depth 20 is 20 * tan(30°) ≈ 11.5: boxes at -10, 0, 10
        assert_eq!(visible, vec![19, 20, 21]);
    }

    #[test]
    fn test_par_visible_matches_serial() {
        let boxes = row_of_boxes();
        let f = frustum();
        assert_eq!(par_visible_indices(&f, &boxes), visible_indices(&f, &boxes));
    }

    #[test]
    fn test_no_boxes() {
        assert!(visible_indices(&frustum(), &[]).is_empty());
        assert!(par_visible_indices(&frustum(), &[]).is_empty());
    }
}
