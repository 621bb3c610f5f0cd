//! Image writers for 8-bit render output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("PPM supports 1 or 3 channels, got {0}")]
    Channels(u32),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

pub type OutputResult<T> = Result<T, OutputError>;

fn check_size(data: &[u8], width: u32, height: u32, channels: u32) -> OutputResult<()> {
    let expected = width as usize * height as usize * channels as usize;
    if data.len() != expected {
        return Err(OutputError::BufferSize {
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Write row-major RGB8 pixels, top row first, as a PNG file.
pub fn write_png<P: AsRef<Path>>(path: P, rgb: &[u8], width: u32, height: u32) -> OutputResult<()> {
    check_size(rgb, width, height, 3)?;
    image::save_buffer_with_format(
        path.as_ref(),
        rgb,
        width,
        height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )?;
    Ok(())
}

/// Write 8-bit pixels as an ASCII PPM: P3 for RGB, P2 for grayscale.
pub fn write_ppm<P: AsRef<Path>>(
    path: P,
    data: &[u8],
    width: u32,
    height: u32,
    channels: u32,
) -> OutputResult<()> {
    let magic = match channels {
        3 => "P3",
        1 => "P2",
        other => return Err(OutputError::Channels(other)),
    };
    check_size(data, width, height, channels)?;

    let mut out = BufWriter::new(File::create(path.as_ref())?);
    writeln!(out, "{}", magic)?;
    writeln!(out, "{} {}", width, height)?;
    writeln!(out, "255")?;

    let row_len = (width * channels) as usize;
    if row_len > 0 {
        for row in data.chunks_exact(row_len) {
            for value in row {
                write!(out, "{} ", value)?;
            }
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Write RGB8 pixels, picking the encoder from the file extension.
pub fn write_image<P: AsRef<Path>>(path: P, rgb: &[u8], width: u32, height: u32) -> OutputResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => write_png(path, rgb, width, height),
        "ppm" => write_ppm(path, rgb, width, height, 3),
        _ => Err(OutputError::UnsupportedFormat(path.display().to_string())),
    }?;

    log::info!("Wrote {}x{} image to {}", width, height, path.display());
    Ok(())
}
