//! Infinite plane primitive.

use crate::hittable::{HitRecord, Hittable};
use crate::{Material, Ray};
use glint_math::{unit_vector, Aabb, Interval, Vec3};

/// Half-extent of the stand-in bounding box in the plane's own directions.
const PLANE_EXTENT: f32 = 1e9;

/// Half-thickness of the bounding box along an axis-aligned normal.
const PLANE_HALF_THICKNESS: f32 = 0.01;

/// Rays closer to parallel than this are treated as misses.
const PARALLEL_EPSILON: f32 = 1e-6;

/// An unbounded plane through `point` with normal `normal`.
///
/// The plane has no finite extent, but it still reports a finite (huge) box
/// so it can sit in a BVH next to bounded primitives.
pub struct Plane<M: Material> {
    point: Vec3,
    normal: Vec3,
    material: M,
    bbox: Aabb,
}

impl<M: Material> Plane<M> {
    /// Create a plane. `normal` is normalized here and need not be unit length.
    pub fn new(point: Vec3, normal: Vec3, material: M) -> Self {
        let normal = unit_vector(normal);
        if normal == Vec3::ZERO {
            log::warn!(
                "Plane at {:?} has a zero-length normal and will never be hit",
                point
            );
        }
        let bbox = Self::stand_in_box(point, normal);

        Self {
            point,
            normal,
            material,
            bbox,
        }
    }

    /// Thin slab for axis-aligned normals, otherwise a cube around everything.
    fn stand_in_box(point: Vec3, normal: Vec3) -> Aabb {
        let aligned_axis = (0..3).find(|&axis| {
            (normal[axis].abs() - 1.0).abs() < PARALLEL_EPSILON
        });

        match aligned_axis {
            Some(axis) => {
                let mut half = Vec3::splat(PLANE_EXTENT);
                half[axis] = PLANE_HALF_THICKNESS;

                let mut center = Vec3::ZERO;
                center[axis] = point[axis];
                Aabb::from_points(center - half, center + half)
            }
            None => Aabb::from_points(Vec3::splat(-PLANE_EXTENT), Vec3::splat(PLANE_EXTENT)),
        }
    }
}

impl<M: Material + 'static> Hittable for Plane<M> {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let denominator = ray.direction().dot(self.normal);
        if denominator.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.point - ray.origin()).dot(self.normal) / denominator;
        if !ray_t.contains(t) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.normal, &self.material))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
