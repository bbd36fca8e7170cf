//! Material trait for surface scattering.

use crate::{hittable::HitRecord, Ray};
use glint_math::sampling::{gen_f32, random_in_unit_sphere};
use glint_math::{near_zero, reflect, refract, unit_vector, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// Outgoing light path produced by a material at a hit.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Per-channel factor applied to the light returning along `scattered`
    pub attenuation: Color,
    /// The continuation ray
    pub scattered: Ray,
}

impl ScatterResult {
    pub fn new(attenuation: Color, scattered: Ray) -> Self {
        Self {
            attenuation,
            scattered,
        }
    }
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    fn scatter(&self, ray: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult>;
}

impl<M: Material + ?Sized> Material for Box<M> {
    fn scatter(&self, ray: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        (**self).scatter(ray, rec, rng)
    }
}

/// Lets several primitives share one material.
impl<M: Material + ?Sized> Material for Arc<M> {
    fn scatter(&self, ray: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        (**self).scatter(ray, rec, rng)
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(&self, _ray: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let scattered = diffuse_ray(rec, rng);
        Some(ScatterResult::new(self.albedo, scattered))
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }
}

impl Material for Metal {
    fn scatter(&self, ray: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        glossy_ray(ray, rec, self.fuzz, rng)
            .map(|scattered| ScatterResult::new(self.albedo, scattered))
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f32, ior: f32) -> f32 {
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }

    /// Ratio of refractive indices across the surface for this hit.
    fn refraction_ratio(&self, front_face: bool) -> f32 {
        if front_face {
            1.0 / self.ior
        } else {
            self.ior
        }
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let refraction_ratio = self.refraction_ratio(rec.front_face);

        let unit_direction = unit_vector(ray.direction());
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

        // Total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let reflects = cannot_refract || gen_f32(rng) < Self::reflectance(cos_theta, self.ior);
        let direction = if reflects {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        // Glass absorbs nothing
        Some(ScatterResult::new(Color::ONE, Ray::new(rec.p, direction)))
    }
}

/// Two-color pattern keyed on the sign of `sin(k·x)·sin(k·z)`.
///
/// Depends on the world-space hit point only, so it tiles any surface that
/// spans the XZ plane.
#[derive(Debug, Clone, Copy)]
pub struct SinePattern {
    pub odd: Color,
    pub even: Color,
    pub frequency: f32,
}

impl SinePattern {
    pub fn new(odd: Color, even: Color, frequency: f32) -> Self {
        Self {
            odd,
            even,
            frequency,
        }
    }

    /// Pattern color at world position `p`.
    pub fn color_at(&self, p: Vec3) -> Color {
        let sines = (self.frequency * p.x).sin() * (self.frequency * p.z).sin();
        if sines < 0.0 {
            self.odd
        } else {
            self.even
        }
    }
}

/// Diffuse checkerboard.
#[derive(Debug, Clone)]
pub struct Checker {
    pattern: SinePattern,
}

impl Checker {
    const FREQUENCY: f32 = 10.0;

    pub fn new(odd: Color, even: Color) -> Self {
        Self {
            pattern: SinePattern::new(odd, even, Self::FREQUENCY),
        }
    }
}

impl Material for Checker {
    fn scatter(&self, _ray: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let scattered = diffuse_ray(rec, rng);
        Some(ScatterResult::new(self.pattern.color_at(rec.p), scattered))
    }
}

/// Polished tiles: fuzzy metal reflection tinted by a [`SinePattern`].
#[derive(Debug, Clone)]
pub struct TiledMetal {
    pattern: SinePattern,
    fuzz: f32,
}

impl TiledMetal {
    pub fn new(pattern: SinePattern, fuzz: f32) -> Self {
        Self {
            pattern,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Dark varnished wood planks.
    pub fn wood() -> Self {
        Self::new(
            SinePattern::new(
                Color::new(0.20, 0.10, 0.05),
                Color::new(0.05, 0.05, 0.05),
                4.0,
            ),
            0.05,
        )
    }

    /// Light polished marble slabs.
    pub fn marble() -> Self {
        Self::new(
            SinePattern::new(
                Color::new(0.95, 0.95, 0.95),
                Color::new(0.85, 0.85, 0.85),
                5.0,
            ),
            0.02,
        )
    }
}

impl Material for TiledMetal {
    fn scatter(&self, ray: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        glossy_ray(ray, rec, self.fuzz, rng)
            .map(|scattered| ScatterResult::new(self.pattern.color_at(rec.p), scattered))
    }
}

/// Diffuse material that shows which side of a surface was hit:
/// blue for front faces, red for back faces.
#[derive(Debug, Clone, Default)]
pub struct FaceDebug;

impl FaceDebug {
    pub const FRONT: Color = Color::new(0.0, 0.0, 1.0);
    pub const BACK: Color = Color::new(1.0, 0.0, 0.0);
}

impl Material for FaceDebug {
    fn scatter(&self, _ray: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let attenuation = if rec.front_face {
            Self::FRONT
        } else {
            Self::BACK
        };
        Some(ScatterResult::new(attenuation, diffuse_ray(rec, rng)))
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Diffuse bounce around the shading normal.
fn diffuse_ray(rec: &HitRecord, rng: &mut dyn RngCore) -> Ray {
    let mut scatter_direction = rec.normal + random_in_unit_sphere(rng);

    // Catch degenerate scatter direction
    if near_zero(scatter_direction) {
        scatter_direction = rec.normal;
    }

    Ray::new(rec.p, scatter_direction)
}

/// Mirror bounce perturbed by `fuzz`; `None` if it would point into the surface.
fn glossy_ray(ray: &Ray, rec: &HitRecord, fuzz: f32, rng: &mut dyn RngCore) -> Option<Ray> {
    let reflected = reflect(unit_vector(ray.direction()), rec.normal);
    let scattered_dir = reflected + fuzz * random_in_unit_sphere(rng);

    if scattered_dir.dot(rec.normal) > 0.0 {
        Some(Ray::new(rec.p, scattered_dir))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record<'a>(ray: &Ray, t: f32, outward: Vec3, material: &'a dyn Material) -> HitRecord<'a> {
        HitRecord::new(ray, t, outward, material)
    }

    #[test]
    fn test_lambertian_always_scatters_outward() {
        let mat = Lambertian::new(Color::new(0.8, 0.3, 0.3));
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let rec = record(&ray, 1.0, Vec3::Y, &mat);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..200 {
            let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::new(0.8, 0.3, 0.3));
            assert_eq!(result.scattered.origin(), rec.p);
            // normal + point in unit sphere stays in the upper hemisphere
            assert!(result.scattered.direction().dot(rec.normal) > -1e-6);
            assert!(!near_zero(result.scattered.direction()));
        }
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let mat = Metal::new(Color::new(0.7, 0.6, 0.5), 0.0);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let rec = record(&ray, 1.0, Vec3::Y, &mat);
        let mut rng = StdRng::seed_from_u64(2);

        let result = mat.scatter(&ray, &rec, &mut rng).expect("mirror reflects");
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((result.scattered.direction() - expected).length() < 1e-6);
        assert_eq!(result.attenuation, Color::new(0.7, 0.6, 0.5));
    }

    #[test]
    fn test_metal_fuzz_clamped() {
        let mat = Metal::new(Color::ONE, 3.0);
        assert_eq!(mat.fuzz, 1.0);
        let mat = Metal::new(Color::ONE, -1.0);
        assert_eq!(mat.fuzz, 0.0);
    }

    #[test]
    fn test_metal_absorbs_rays_scattered_inward() {
        // Grazing ray with full fuzz: some perturbed reflections dip below
        // the surface and must be absorbed, the rest must point outward.
        let mat = Metal::new(Color::ONE, 1.0);
        let ray = Ray::new(Vec3::new(-1.0, 0.01, 0.0), Vec3::new(1.0, -0.01, 0.0));
        let rec = record(&ray, 1.0, Vec3::Y, &mat);
        let mut rng = StdRng::seed_from_u64(3);

        let mut absorbed = 0;
        for _ in 0..500 {
            match mat.scatter(&ray, &rec, &mut rng) {
                Some(result) => assert!(result.scattered.direction().dot(rec.normal) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_normal_incidence_never_reflects_totally() {
        let mat = Dielectric::new(1.5);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let mut rng = StdRng::seed_from_u64(4);

        for front_face_normal in [Vec3::Y, Vec3::NEG_Y] {
            let rec = record(&ray, 1.0, front_face_normal, &mat);
            let ratio = mat.refraction_ratio(rec.front_face);
            let cos_theta = (-ray.direction()).dot(rec.normal).min(1.0);
            let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
            assert!(ratio * sin_theta <= 1.0);

            let mut refracted = 0;
            for _ in 0..200 {
                let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
                assert_eq!(result.attenuation, Color::ONE);
                if result.scattered.direction().y < 0.0 {
                    refracted += 1;
                }
            }
            // Schlick reflectance at normal incidence is 4%
            assert!(refracted > 150, "only {refracted} of 200 rays refracted");
        }
    }

    #[test]
    fn test_dielectric_grazing_from_inside_reflects() {
        let mat = Dielectric::new(1.5);
        // Inside the glass, nearly parallel to the surface
        let ray = Ray::new(Vec3::new(-1.0, -0.05, 0.0), Vec3::new(1.0, 0.05, 0.0));
        // Outward normal points along +Y, the ray travels with it: back face
        let rec = record(&ray, 1.0, Vec3::Y, &mat);
        assert!(!rec.front_face);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..100 {
            let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
            let dir = result.scattered.direction();
            // Reflected back into the glass, mirrored about the surface
            assert!(dir.y < 0.0);
            assert!((dir.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_dielectric_reflectance_symmetric() {
        let a = Dielectric::reflectance(0.7, 1.5);
        let b = Dielectric::reflectance(0.7, 1.0 / 1.5);
        assert!((a - b).abs() < 1e-6);
        assert!((Dielectric::reflectance(1.0, 1.5) - 0.04).abs() < 1e-6);
        assert!((Dielectric::reflectance(0.0, 1.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sine_pattern() {
        let pattern = SinePattern::new(Color::X, Color::Y, 10.0);
        // sin(1)*sin(1) > 0
        assert_eq!(pattern.color_at(Vec3::new(0.1, 0.0, 0.1)), Color::Y);
        // sin(1)*sin(-1) < 0
        assert_eq!(pattern.color_at(Vec3::new(0.1, 0.0, -0.1)), Color::X);
        // y is ignored
        assert_eq!(pattern.color_at(Vec3::new(0.1, 50.0, -0.1)), Color::X);
    }

    #[test]
    fn test_checker_color_from_position() {
        let mat = Checker::new(Color::new(0.1, 0.1, 0.1), Color::new(0.9, 0.9, 0.9));
        let mut rng = StdRng::seed_from_u64(6);

        let ray = Ray::new(Vec3::new(0.1, 1.0, 0.1), Vec3::NEG_Y);
        let rec = record(&ray, 1.0, Vec3::Y, &mat);
        let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
        assert_eq!(result.attenuation, Color::new(0.9, 0.9, 0.9));

        let ray = Ray::new(Vec3::new(0.1, 1.0, -0.1), Vec3::NEG_Y);
        let rec = record(&ray, 1.0, Vec3::Y, &mat);
        let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
        assert_eq!(result.attenuation, Color::new(0.1, 0.1, 0.1));
    }

    #[test]
    fn test_tiled_metal_presets() {
        let mut rng = StdRng::seed_from_u64(7);
        let ray = Ray::new(Vec3::new(0.1, 1.0, 0.1), Vec3::NEG_Y);

        let wood = TiledMetal::wood();
        let rec = record(&ray, 1.0, Vec3::Y, &wood);
        let result = wood.scatter(&ray, &rec, &mut rng).unwrap();
        // sin(0.4)*sin(0.4) > 0 -> dark wood
        assert_eq!(result.attenuation, Color::new(0.05, 0.05, 0.05));
        assert!(result.scattered.direction().y > 0.0);

        let marble = TiledMetal::marble();
        let rec = record(&ray, 1.0, Vec3::Y, &marble);
        let result = marble.scatter(&ray, &rec, &mut rng).unwrap();
        assert_eq!(result.attenuation, Color::new(0.85, 0.85, 0.85));
    }

    #[test]
    fn test_face_debug_colors() {
        let mat = FaceDebug;
        let mut rng = StdRng::seed_from_u64(8);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);

        let front = record(&ray, 1.0, Vec3::Y, &mat);
        assert_eq!(
            mat.scatter(&ray, &front, &mut rng).unwrap().attenuation,
            FaceDebug::FRONT
        );

        let back = record(&ray, 1.0, Vec3::NEG_Y, &mat);
        assert_eq!(
            mat.scatter(&ray, &back, &mut rng).unwrap().attenuation,
            FaceDebug::BACK
        );
    }
}
