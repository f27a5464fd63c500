//! # Mouse Picking
//!
//! CPU-side ray casting against world-space bounding boxes. A click is
//! unprojected through the inverse view-projection matrix into a world ray,
//! then tested against each pickable object's AABB. The nearest hit wins.

use cgmath::{InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4};

/// World-space ray with a normalized direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vector3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Builds a ray from a cursor position in window coordinates
    ///
    /// Returns `None` when the view-projection matrix is singular, which can
    /// only happen with a degenerate camera.
    pub fn from_screen(
        screen_x: f32,
        screen_y: f32,
        screen_width: f32,
        screen_height: f32,
        view_proj: Matrix4<f32>,
    ) -> Option<Self> {
        let inverse = view_proj.invert()?;

        let ndc_x = (screen_x / screen_width) * 2.0 - 1.0;
        let ndc_y = 1.0 - (screen_y / screen_height) * 2.0;

        let near = inverse * Vector4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = inverse * Vector4::new(ndc_x, ndc_y, 1.0, 1.0);
        if near.w.abs() < f32::EPSILON || far.w.abs() < f32::EPSILON {
            return None;
        }

        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;
        Some(Self::new(near, far - near))
    }

    /// Slab test against an AABB, returning the entry distance on hit
    pub fn intersects_aabb(&self, aabb: &Aabb) -> Option<f32> {
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let direction = self.direction[axis];
            let min = aabb.min[axis];
            let max = aabb.max[axis];

            if direction.abs() < f32::EPSILON {
                if origin < min || origin > max {
                    return None;
                }
                continue;
            }

            let t1 = (min - origin) / direction;
            let t2 = (max - origin) / direction;
            t_min = t_min.max(t1.min(t2));
            t_max = t_max.min(t1.max(t2));
            if t_min > t_max {
                return None;
            }
        }

        if t_max < 0.0 {
            return None;
        }
        Some(t_min.max(0.0))
    }
}

/// Axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Aabb {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Bounds of the box after uniform scale about its center and translation
    pub fn transformed(&self, scale: f32, translation: Vector3<f32>) -> Self {
        let center = (self.min + self.max) / 2.0;
        let half = (self.max - self.min) / 2.0 * scale;
        Self {
            min: center + translation - half,
            max: center + translation + half,
        }
    }
}

/// Casts a ray against a set of bounding boxes and returns the index of the
/// closest hit
pub fn pick_nearest(ray: &Ray, boxes: &[Aabb]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, aabb) in boxes.iter().enumerate() {
        if let Some(distance) = ray.intersects_aabb(aabb) {
            match best {
                Some((_, best_distance)) if best_distance <= distance => {}
                _ => best = Some((index, distance)),
            }
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, Point3, Vector3};

    fn unit_box_at(x: f32) -> Aabb {
        Aabb::new(
            Vector3::new(x - 0.5, -0.5, -0.5),
            Vector3::new(x + 0.5, 0.5, 0.5),
        )
    }

    #[test]
    fn test_ray_hits_box_ahead() {
        let ray = Ray::new(Vector3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
        let hit = ray.intersects_aabb(&unit_box_at(0.0));
        assert!((hit.unwrap() - 4.5).abs() < 1e-5);
    }

    #[test]
    fn test_ray_misses_box_behind() {
        let ray = Ray::new(Vector3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(ray.intersects_aabb(&unit_box_at(0.0)).is_none());
    }

    #[test]
    fn test_ray_starting_inside_hits() {
        let ray = Ray::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(ray.intersects_aabb(&unit_box_at(0.0)), Some(0.0));
    }

    #[test]
    fn test_parallel_ray_outside_slab_misses() {
        let ray = Ray::new(Vector3::new(0.0, 2.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(ray.intersects_aabb(&unit_box_at(0.0)).is_none());
    }

    #[test]
    fn test_nearest_hit_wins() {
        let ray = Ray::new(Vector3::new(-5.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        let boxes = [unit_box_at(2.0), unit_box_at(-2.0), unit_box_at(0.0)];
        assert_eq!(pick_nearest(&ray, &boxes), Some(1));
    }

    #[test]
    fn test_miss_returns_none() {
        let ray = Ray::new(Vector3::new(0.0, 10.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        let boxes = [unit_box_at(0.0)];
        assert_eq!(pick_nearest(&ray, &boxes), None);
    }

    #[test]
    fn test_screen_center_ray_points_at_target() {
        let view = Matrix4::look_at_rh(
            Point3::new(0.0, 0.0, 5.0),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::unit_y(),
        );
        let proj = cgmath::perspective(Deg(75.0), 16.0 / 9.0, 0.1, 1000.0);
        let ray = Ray::from_screen(640.0, 360.0, 1280.0, 720.0, proj * view).unwrap();

        assert!((ray.direction - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-3);
        assert!(ray.intersects_aabb(&unit_box_at(0.0)).is_some());
    }

    #[test]
    fn test_transformed_aabb_scales_about_center() {
        let aabb = unit_box_at(0.0).transformed(2.0, Vector3::new(1.0, 0.0, 0.0));
        assert!((aabb.min.x + 0.0).abs() < 1e-5);
        assert!((aabb.max.x - 2.0).abs() < 1e-5);
    }
}
