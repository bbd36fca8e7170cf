//! Camera for ray generation.

use crate::Ray;
use glint_math::sampling::random_in_unit_disk;
use glint_math::{unit_vector, Vec3};
use rand::RngCore;

/// Camera settings, turned into an immutable [`Camera`] by [`CameraBuilder::build`].
#[derive(Debug, Clone)]
pub struct CameraBuilder {
    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Lens settings
    vfov: f32,         // Vertical field of view in degrees
    aperture: f32,     // Lens diameter, 0 for a pinhole
    focus_dist: f32,   // Distance from camera to plane of perfect focus
    aspect_ratio: f32, // Viewport width / height
}

impl Default for CameraBuilder {
    fn default() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            vup: Vec3::Y,
            vfov: 90.0,
            aperture: 0.0,
            focus_dist: 1.0,
            aspect_ratio: 16.0 / 9.0,
        }
    }
}

impl CameraBuilder {
    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings. An aperture of zero disables depth of field.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture.max(0.0);
        self.focus_dist = focus_dist;
        self
    }

    /// Set viewport aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Derive the viewport from the settings.
    pub fn build(self) -> Camera {
        let lens_radius = self.aperture / 2.0;

        // The viewport only moves to the focus plane when there is a lens
        let focus = if lens_radius > 0.0 { self.focus_dist } else { 1.0 };

        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = self.aspect_ratio * viewport_height;

        // Camera basis vectors
        let w = unit_vector(self.look_from - self.look_at);
        let u = unit_vector(self.vup.cross(w));
        let v = w.cross(u);

        let origin = self.look_from;
        let horizontal = focus * viewport_width * u;
        let vertical = focus * viewport_height * v;
        let lower_left_corner = origin - horizontal / 2.0 - vertical / 2.0 - focus * w;

        Camera {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius,
        }
    }
}

/// Maps viewport coordinates to world-space rays.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Start from the defaults: at the origin looking down -Z, 90° vfov, 16:9, pinhole.
    pub fn builder() -> CameraBuilder {
        CameraBuilder::default()
    }

    /// Ray through viewport position `(s, t)`, both in [0, 1] with (0, 0)
    /// at the lower-left corner.
    ///
    /// With a lens, the origin is jittered across the aperture and the
    /// direction corrected so all jittered rays meet on the focus plane.
    /// A pinhole camera draws nothing from `rng`.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;

        if self.lens_radius <= 0.0 {
            return Ray::new(self.origin, target - self.origin);
        }

        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;
        Ray::new(self.origin + offset, target - self.origin - offset)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit vector pointing from the scene back toward the camera.
    pub fn backward(&self) -> Vec3 {
        self.w
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_camera_basis() {
        let camera = Camera::builder()
            .with_position(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y)
            .with_lens(90.0, 0.0, 1.0)
            .build();

        assert_eq!(camera.origin(), Vec3::ZERO);
        assert!((camera.backward() - Vec3::Z).length() < 0.001);
        assert!((camera.u - Vec3::X).length() < 1e-6);
        assert!((camera.v - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_camera_center_ray() {
        let camera = Camera::builder().with_aspect_ratio(1.0).build();
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(ray.origin(), Vec3::ZERO);
        assert!((ray.direction() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_camera_viewport_corners() {
        // 90° vfov: viewport height 2 at distance 1
        let camera = Camera::builder().with_aspect_ratio(2.0).build();
        let mut rng = StdRng::seed_from_u64(42);

        let lower_left = camera.get_ray(0.0, 0.0, &mut rng);
        let expected = Vec3::new(-2.0, -1.0, -1.0);
        assert!((lower_left.direction() - expected).length() < 1e-5);

        let upper_right = camera.get_ray(1.0, 1.0, &mut rng);
        let expected = Vec3::new(2.0, 1.0, -1.0);
        assert!((upper_right.direction() - expected).length() < 1e-5);
    }

    #[test]
    fn test_camera_look_at_target() {
        let from = Vec3::new(13.0, 2.0, 3.0);
        let at = Vec3::new(0.0, 0.0, 0.0);
        let camera = Camera::builder()
            .with_position(from, at, Vec3::Y)
            .with_lens(20.0, 0.0, 10.0)
            .build();
        let mut rng = StdRng::seed_from_u64(1);

        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        let expected = (at - from).normalize();
        assert!((ray.direction().normalize() - expected).length() < 1e-5);
    }

    #[test]
    fn test_camera_defocus_rays_converge() {
        let focus_dist = 4.0;
        let camera = Camera::builder()
            .with_position(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y)
            .with_lens(40.0, 0.5, focus_dist)
            .build();
        assert_eq!(camera.lens_radius(), 0.25);

        let mut rng = StdRng::seed_from_u64(9);
        let (s, t) = (0.3, 0.8);
        let target = camera.lower_left_corner + s * camera.horizontal + t * camera.vertical;
        assert!((target.z - (-focus_dist)).abs() < 1e-5);

        let mut jittered = 0;
        for _ in 0..100 {
            let ray = camera.get_ray(s, t, &mut rng);
            // Origin on the lens disk
            assert!(ray.origin().z.abs() < 1e-6);
            assert!(ray.origin().length() <= 0.25 + 1e-6);
            if ray.origin() != Vec3::ZERO {
                jittered += 1;
            }
            // Every ray passes through the same point on the focus plane
            assert!((ray.at(1.0) - target).length() < 1e-4);
        }
        assert!(jittered > 90);
    }

    #[test]
    fn test_pinhole_does_not_consume_rng() {
        let camera = Camera::default();
        let mut a = StdRng::seed_from_u64(5);
        let mut b = StdRng::seed_from_u64(5);

        camera.get_ray(0.2, 0.7, &mut a);
        assert_eq!(a.next_u64(), b.next_u64());
    }
}
