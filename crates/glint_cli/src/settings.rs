//! Render settings: JSON file, command line, and the defaults beneath both.

use crate::cli::Args;
use crate::scenes::ScenePreset;
use anyhow::{Context, Result};
use glint_renderer::{Color, RenderConfig, Sky, Sun, Vec3};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_WIDTH: u32 = 400;
pub const DEFAULT_HEIGHT: u32 = 225;
pub const DEFAULT_SAMPLES: u32 = 50;
pub const DEFAULT_MAX_DEPTH: u32 = 50;
pub const DEFAULT_OUTPUT: &str = "image.png";

/// Every field a settings file may set. Missing fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub scene: Option<ScenePreset>,
    pub output: Option<PathBuf>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub samples: Option<u32>,
    pub max_depth: Option<u32>,
    pub seed: Option<u64>,
    pub bucket_size: Option<u32>,
    pub sun: Option<bool>,
}

impl SettingsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("invalid settings file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub scene: ScenePreset,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub samples: u32,
    pub max_depth: u32,
    pub seed: u64,
    pub bucket_size: u32,
    pub sun: bool,
}

impl Settings {
    /// Command line first, then the file, then defaults.
    pub fn resolve(args: &Args, file: SettingsFile) -> Self {
        Self {
            scene: args.scene.or(file.scene).unwrap_or_default(),
            output: args
                .output
                .clone()
                .or(file.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            width: args.width.or(file.width).unwrap_or(DEFAULT_WIDTH),
            height: args.height.or(file.height).unwrap_or(DEFAULT_HEIGHT),
            samples: args.samples.or(file.samples).unwrap_or(DEFAULT_SAMPLES),
            max_depth: args
                .max_depth
                .or(file.max_depth)
                .unwrap_or(DEFAULT_MAX_DEPTH),
            seed: args.seed.or(file.seed).unwrap_or(0),
            bucket_size: args
                .bucket_size
                .or(file.bucket_size)
                .unwrap_or(glint_renderer::DEFAULT_BUCKET_SIZE),
            sun: args.sun || file.sun.unwrap_or(false),
        }
    }

    pub fn sky(&self) -> Sky {
        let sky = Sky::default();
        if self.sun {
            sky.with_sun(Sun::new(
                Vec3::new(-0.5, 0.7, -0.5),
                512.0,
                Color::new(6.0, 5.5, 4.5),
            ))
        } else {
            sky
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::new(
            self.width,
            self.height,
            self.samples,
            self.max_depth,
            self.seed,
        )
        .with_sky(self.sky())
        .with_bucket_size(self.bucket_size)
    }
}
