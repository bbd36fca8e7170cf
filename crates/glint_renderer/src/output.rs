//! Writing rendered images to disk.

use crate::error::{OutputError, OutputResult};
use crate::renderer::{color_to_rgb, pixel_count, ImageBuffer};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write `image` as a plain-text PPM (P3).
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for color in &image.pixels {
        let [r, g, b] = color_to_rgb(*color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    Ok(())
}

/// Save `image` to `path`.
///
/// A `.ppm` extension writes text PPM; anything else is handed to the
/// `image` crate, which picks the encoder from the extension.
pub fn save_image(image: &ImageBuffer, path: impl AsRef<Path>) -> OutputResult<()> {
    let path = path.as_ref();
    let is_ppm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        let io_err = |source| OutputError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        write_ppm(image, &mut writer).map_err(io_err)?;
        writer.flush().map_err(io_err)?;
    } else {
        let bytes = image.to_rgb8();
        let expected = pixel_count(image.width, image.height) * 3;
        let actual = bytes.len();
        let rgb = image::RgbImage::from_raw(image.width, image.height, bytes)
            .ok_or(OutputError::BufferSize { expected, actual })?;
        rgb.save(path)?;
    }

    log::info!(
        "Saved {}x{} image to {}",
        image.width,
        image.height,
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("glint_output_{}_{}", std::process::id(), name))
    }

    fn two_pixel_image() -> ImageBuffer {
        let mut image = ImageBuffer::new(2, 1);
        image.set(0, 0, Color::new(1.0, 0.25, 0.0));
        image.set(1, 0, Color::new(0.0, 0.0, 0.04));
        image
    }

    #[test]
    fn test_write_ppm() {
        let mut out = Vec::new();
        write_ppm(&two_pixel_image(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n255 128 0\n0 0 51\n");
    }

    #[test]
    fn test_save_ppm() {
        let path = scratch_path("save.ppm");
        save_image(&two_pixel_image(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("P3\n2 1\n255\n"));
        assert_eq!(text.lines().count(), 5);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_png() {
        let path = scratch_path("save.png");
        save_image(&two_pixel_image(), &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (2, 1));
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 128, 0]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_short_buffer() {
        let image = ImageBuffer {
            width: 2,
            height: 2,
            pixels: vec![Color::ONE],
        };
        let err = save_image(&image, scratch_path("short.png")).unwrap_err();
        assert!(matches!(
            err,
            OutputError::BufferSize {
                expected: 12,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_save_into_missing_directory() {
        let path = scratch_path("missing_dir").join("image.ppm");
        let err = save_image(&two_pixel_image(), &path).unwrap_err();
        assert!(matches!(err, OutputError::Io { .. }));
    }
}
