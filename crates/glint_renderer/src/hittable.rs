//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, Ray};
use glint_math::{Aabb, Interval, Vec3};
use std::sync::Arc;

/// Record of a ray-object intersection.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal, always pointing against the incoming ray
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a dyn Material,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record for a hit at parameter `t`.
    ///
    /// `outward_normal` must be unit length. The stored normal is flipped
    /// when the ray arrives from the inside, and `front_face` records which
    /// side was hit; dielectrics depend on both.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: &'a dyn Material) -> Self {
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p: ray.at(t),
            normal,
            material,
            t,
            front_face,
        }
    }
}

impl std::fmt::Debug for HitRecord<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitRecord")
            .field("p", &self.p)
            .field("normal", &self.normal)
            .field("t", &self.t)
            .field("front_face", &self.front_face)
            .finish_non_exhaustive()
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Find the closest intersection with parameter strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;
}

/// Shared primitives, e.g. one object referenced from several aggregates.
impl<H: Hittable + ?Sized> Hittable for Arc<H> {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        (**self).hit(ray, ray_t)
    }

    fn bounding_box(&self) -> Aabb {
        (**self).bounding_box()
    }
}

/// A list of hittable objects, intersected by linear scan.
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
    bbox: Aabb,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    /// Clear all objects from the list.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.bbox = Aabb::EMPTY;
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Bounds of all members, or `None` for an empty list.
    pub fn bounds(&self) -> Option<Aabb> {
        (!self.is_empty()).then_some(self.bbox)
    }

    /// Hand the objects over, e.g. to [`crate::BvhNode::new`].
    pub fn into_objects(self) -> Vec<Box<dyn Hittable>> {
        self.objects
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Box<dyn Hittable>>> for HittableList {
    fn from(objects: Vec<Box<dyn Hittable>>) -> Self {
        let mut list = Self::new();
        for object in objects {
            list.add(object);
        }
        list
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for object in &self.objects {
            let window = match &closest {
                Some(rec) => ray_t.with_max(rec.t),
                None => ray_t,
            };
            if let Some(rec) = object.hit(ray, window) {
                closest = Some(rec);
            }
        }

        closest
    }

    /// [`Aabb::EMPTY`] when the list has no members.
    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Lambertian, Metal, Sphere};

    #[test]
    fn test_hit_record_front_face() {
        let mat = Lambertian::new(Color::ONE);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);

        let rec = HitRecord::new(&ray, 4.0, Vec3::Z, &mat);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
        assert_eq!(rec.p, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_hit_record_back_face() {
        let mat = Lambertian::new(Color::ONE);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        // Leaving through a surface whose outward normal points along the ray
        let rec = HitRecord::new(&ray, 1.0, Vec3::NEG_Z, &mat);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_list_returns_closest() {
        let mut list = HittableList::new();
        list.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -10.0),
            1.0,
            Lambertian::new(Color::new(1.0, 0.0, 0.0)),
        )));
        list.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -3.0),
            1.0,
            Metal::new(Color::new(0.0, 1.0, 0.0), 0.0),
        )));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = list
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("ray should hit the near sphere");

        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_list_respects_interval() {
        let mut list = HittableList::new();
        list.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -3.0),
            1.0,
            Lambertian::new(Color::ONE),
        )));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(list.hit(&ray, Interval::new(0.001, 1.5)).is_none());
    }

    #[test]
    fn test_empty_list() {
        let list = HittableList::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert!(list.is_empty());
        assert!(list.bounds().is_none());
        assert!(list.bounding_box().is_empty());
        assert!(list.hit(&ray, Interval::UNIVERSE).is_none());
    }

    #[test]
    fn test_list_bounds_fold() {
        let mut list = HittableList::new();
        list.add(Box::new(Sphere::new(
            Vec3::new(-2.0, 0.0, 0.0),
            1.0,
            Lambertian::new(Color::ONE),
        )));
        list.add(Box::new(Sphere::new(
            Vec3::new(3.0, 1.0, 0.0),
            0.5,
            Lambertian::new(Color::ONE),
        )));

        let bounds = list.bounds().expect("non-empty list has bounds");
        assert_eq!(bounds.min, Vec3::new(-3.0, -1.0, -1.0));
        assert_eq!(bounds.max, Vec3::new(3.5, 1.5, 1.0));

        list.clear();
        assert!(list.bounds().is_none());
    }
}
