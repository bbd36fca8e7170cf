use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::{render, save_image, BvhNode};
use log::LevelFilter;
use std::time::Instant;

mod cli;
mod scenes;
mod settings;

use cli::Args;
use settings::{Settings, SettingsFile};

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let file = match &args.settings {
        Some(path) => SettingsFile::load(path)?,
        None => SettingsFile::default(),
    };
    let settings = Settings::resolve(&args, file);
    let config = settings.render_config();

    let start = Instant::now();
    let scene = scenes::build(settings.scene, settings.seed);
    log::info!("Scene {:?}: {} objects", settings.scene, scene.world.len());

    let camera = scene
        .camera
        .with_aspect_ratio(settings.aspect_ratio())
        .build();
    let world = BvhNode::from(scene.world);
    log::info!("Scene built in {:?}", start.elapsed());

    let image = render(&camera, &world, &config).context("invalid render settings")?;

    save_image(&image, &settings.output)
        .with_context(|| format!("failed to save {}", settings.output.display()))?;

    Ok(())
}
