//! Mapping between framebuffer pixels and world-space rays.
//!
//! Pixel coordinates have their origin at the top-left corner with `y`
//! growing downward. Clip space follows the OpenGL convention, so the near
//! plane sits at NDC `z = -1` and the far plane at `z = +1`.

use glsandbox_math::{Mat4, Point3, Vec4};

use crate::Ray;

fn ndc_from_pixel(screen_x: f64, screen_y: f64, fb_width: u32, fb_height: u32) -> (f32, f32) {
    let w = f64::from(fb_width.max(1));
    let h = f64::from(fb_height.max(1));
    let x = 2.0 * screen_x / w - 1.0;
    let y = 1.0 - 2.0 * screen_y / h;
    (x as f32, y as f32)
}

fn unproject(inv_vp: &Mat4, x: f32, y: f32, z: f32) -> Point3 {
    let p = inv_vp * Vec4::new(x, y, z, 1.0);
    Point3::new(p.x / p.w, p.y / p.w, p.z / p.w)
}

/// Build the world-space picking ray through pixel `(screen_x, screen_y)`.
///
/// `inv_vp` is the inverse of `projection * view`. The pixel is unprojected
/// onto the near and far planes; the ray starts on the near plane and points
/// at the far one. A zero framebuffer dimension is treated as 1.
pub fn screen_ray_from_inv_vp(
    inv_vp: &Mat4,
    screen_x: f64,
    screen_y: f64,
    fb_width: u32,
    fb_height: u32,
) -> Ray {
    let (x, y) = ndc_from_pixel(screen_x, screen_y, fb_width, fb_height);
    let near = unproject(inv_vp, x, y, -1.0);
    let far = unproject(inv_vp, x, y, 1.0);
    Ray::new(near, far - near)
}

/// Project a world-space point to pixel coordinates.
///
/// Returns `None` when the point is on or behind the camera plane
/// (`w <= 0` in clip space). Points outside the viewport still map to pixel
/// coordinates outside `0..width` / `0..height`.
pub fn project_to_screen(
    view_projection: &Mat4,
    point: &Point3,
    fb_width: u32,
    fb_height: u32,
) -> Option<(f64, f64)> {
    let clip = view_projection * point.to_homogeneous();
    if clip.w <= 0.0 {
        return None;
    }

    let x = f64::from(clip.x / clip.w);
    let y = f64::from(clip.y / clip.w);
    let w = f64::from(fb_width.max(1));
    let h = f64::from(fb_height.max(1));
    Some(((x + 1.0) * 0.5 * w, (1.0 - y) * 0.5 * h))
}
