use crate::scenes::ScenePreset;
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments.
///
/// Render options left unset fall back to the settings file, then to the
/// built-in defaults.
#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(version, about = "A CPU path tracer for spheres and planes")]
pub struct Args {
    /// Scene preset to render
    #[arg(value_enum)]
    pub scene: Option<ScenePreset>,

    /// Output file path (.ppm for text PPM, anything else by extension, e.g. .png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Maximum number of bounces per path
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for all random sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Edge length of a render bucket in pixels
    #[arg(long)]
    pub bucket_size: Option<u32>,

    /// Add a sun to the sky
    #[arg(long)]
    pub sun: bool,

    /// JSON file with render settings
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Log per-bucket progress
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["glint"]).unwrap();
        assert!(args.scene.is_none());
        assert!(args.width.is_none());
        assert!(!args.sun);
        assert!(!args.verbose);
    }

    #[test]
    fn test_parse_full() {
        let args = Args::try_parse_from([
            "glint", "random", "-o", "out.png", "--width", "320", "--height", "180", "-s", "8",
            "--max-depth", "4", "--seed", "99", "--bucket-size", "16", "--sun", "-v",
        ])
        .unwrap();

        assert_eq!(args.scene, Some(ScenePreset::Random));
        assert_eq!(args.output, Some(PathBuf::from("out.png")));
        assert_eq!(args.width, Some(320));
        assert_eq!(args.height, Some(180));
        assert_eq!(args.samples, Some(8));
        assert_eq!(args.max_depth, Some(4));
        assert_eq!(args.seed, Some(99));
        assert_eq!(args.bucket_size, Some(16));
        assert!(args.sun);
        assert!(args.verbose);
    }

    #[test]
    fn test_unknown_scene_rejected() {
        assert!(Args::try_parse_from(["glint", "teapot"]).is_err());
    }
}
