//! Simple path tracer example.
//!
//! Renders three spheres on a checkered floor and saves to PPM format.

use glint_renderer::{
    render, save_image, BvhNode, Camera, Checker, Color, Dielectric, HittableList, Lambertian,
    Metal, Plane, RenderConfig, Sphere, Vec3,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let world = BvhNode::from(build_scene());

    let (width, height) = (400, 225);
    let camera = Camera::builder()
        .with_position(Vec3::new(0.0, 1.5, 6.0), Vec3::new(0.0, 0.5, 0.0), Vec3::Y)
        .with_lens(35.0, 0.0, 6.0)
        .with_aspect_ratio(width as f32 / height as f32)
        .build();

    let config = RenderConfig::new(width, height, 32, 10, 7);
    let image = render(&camera, &world, &config)?;

    save_image(&image, "output.ppm")?;
    Ok(())
}

fn build_scene() -> HittableList {
    let mut world = HittableList::new();

    world.add(Box::new(Plane::new(
        Vec3::new(0.0, -0.5, 0.0),
        Vec3::Y,
        Checker::new(Color::new(0.2, 0.3, 0.1), Color::new(0.9, 0.9, 0.9)),
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(-1.1, 0.0, 0.0),
        0.5,
        Lambertian::new(Color::new(0.1, 0.2, 0.5)),
    )));
    world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, 0.0), 0.5, Dielectric::new(1.5))));
    world.add(Box::new(Sphere::new(
        Vec3::new(1.1, 0.0, 0.0),
        0.5,
        Metal::new(Color::new(0.8, 0.6, 0.2), 0.1),
    )));

    world
}
