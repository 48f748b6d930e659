//! Writing rendered images to disk.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::{color_to_rgb, ImageBuffer};

/// Errors that can occur while saving an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("unsupported output format '{0}' (expected .ppm or .png)")]
    UnsupportedFormat(String),

    #[error("image buffer holds {pixels} pixels, expected {width}x{height}")]
    BufferSize { width: u32, height: u32, pixels: usize },
}

/// Write `image` as an ASCII PPM (P3), top row first, one pixel per line.
pub fn write_ppm<W: Write>(writer: &mut W, image: &ImageBuffer) -> io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for color in &image.pixels {
        let [r, g, b] = color_to_rgb(*color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    Ok(())
}

/// Save `buffer` to `path`, picking the format from the extension.
pub fn save_image<P: AsRef<Path>>(path: P, buffer: &ImageBuffer) -> Result<(), OutputError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_ppm(&mut writer, buffer)?;
            writer.flush()?;
        }
        "png" => {
            let rgb = image::RgbImage::from_raw(buffer.width, buffer.height, buffer.to_rgb8())
                .ok_or(OutputError::BufferSize {
                    width: buffer.width,
                    height: buffer.height,
                    pixels: buffer.pixels.len(),
                })?;
            rgb.save_with_format(path, image::ImageFormat::Png)?;
        }
        other => return Err(OutputError::UnsupportedFormat(other.to_string())),
    }

    log::info!("Saved {}x{} image to {}", buffer.width, buffer.height, path.display());
    Ok(())
}
