//! Built-in scenes.

use clap::ValueEnum;
use glint_renderer::{
    Camera, CameraBuilder, Checker, Color, Dielectric, HittableList, Lambertian, Metal, Plane,
    Sphere, TiledMetal, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenePreset {
    /// Glass, metal, diffuse and checkered spheres on marble tiles
    #[default]
    Materials,
    /// One diffuse sphere on a huge ground sphere
    Simple,
    /// Hundreds of small random spheres around three large ones
    Random,
}

/// Geometry plus a camera placement; the aspect ratio is set by the caller.
pub struct Scene {
    pub world: HittableList,
    pub camera: CameraBuilder,
}

/// Build `preset`. Only [`ScenePreset::Random`] uses `seed`.
pub fn build(preset: ScenePreset, seed: u64) -> Scene {
    match preset {
        ScenePreset::Materials => materials(),
        ScenePreset::Simple => simple(),
        ScenePreset::Random => random(seed),
    }
}

fn materials() -> Scene {
    let mut world = HittableList::new();

    world.add(Box::new(Plane::new(Vec3::new(0.0, -0.5, 0.0), Vec3::Y, TiledMetal::marble())));

    world.add(Box::new(Sphere::new(
        Vec3::new(-1.5, 0.0, -1.5),
        0.5,
        Lambertian::new(Color::new(0.1, 0.2, 0.5)),
    )));
    world.add(Box::new(Sphere::new(Vec3::new(-0.5, 0.0, -1.5), 0.5, Dielectric::new(1.5))));
    world.add(Box::new(Sphere::new(
        Vec3::new(0.5, 0.0, -1.5),
        0.5,
        Metal::new(Color::new(0.8, 0.6, 0.2), 0.05),
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(1.5, 0.0, -1.5),
        0.5,
        Checker::new(Color::new(0.2, 0.3, 0.1), Color::new(0.9, 0.9, 0.9)),
    )));
    world.add(Box::new(Sphere::new(Vec3::new(0.0, -0.25, -0.4), 0.25, TiledMetal::wood())));

    let camera = Camera::builder()
        .with_position(Vec3::new(0.0, 0.6, 1.5), Vec3::new(0.0, 0.0, -1.5), Vec3::Y)
        .with_lens(55.0, 0.0, 3.0);

    Scene { world, camera }
}

fn simple() -> Scene {
    let mut world = HittableList::new();

    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, -100.5, -1.0),
        100.0,
        Lambertian::new(Color::new(0.8, 0.8, 0.0)),
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        Lambertian::new(Color::new(0.7, 0.3, 0.3)),
    )));

    Scene {
        world,
        camera: Camera::builder(),
    }
}

fn random(seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = HittableList::new();

    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Lambertian::new(Color::new(0.5, 0.5, 0.5)),
    )));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f32 = rng.gen();
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            // Keep clear of the large spheres
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                let albedo = random_color(&mut rng, 0.0, 1.0) * random_color(&mut rng, 0.0, 1.0);
                world.add(Box::new(Sphere::new(center, 0.2, Lambertian::new(albedo))));
            } else if choose_mat < 0.95 {
                let albedo = random_color(&mut rng, 0.5, 1.0);
                let fuzz = rng.gen_range(0.0..0.5);
                world.add(Box::new(Sphere::new(center, 0.2, Metal::new(albedo, fuzz))));
            } else {
                world.add(Box::new(Sphere::new(center, 0.2, Dielectric::new(1.5))));
            }
        }
    }

    world.add(Box::new(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, Dielectric::new(1.5))));
    world.add(Box::new(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Lambertian::new(Color::new(0.4, 0.2, 0.1)),
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Metal::new(Color::new(0.7, 0.6, 0.5), 0.0),
    )));

    let camera = Camera::builder()
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.1, 10.0);

    Scene { world, camera }
}

fn random_color(rng: &mut StdRng, min: f32, max: f32) -> Color {
    Color::new(
        rng.gen_range(min..max),
        rng.gen_range(min..max),
        rng.gen_range(min..max),
    )
}
