//! Writes rendered frames to disk.
//!
//! Frames are already clamped to `[0, 1]`, so this only quantizes to 8 bits
//! and hands the buffer to the `image` crate. The format follows the file
//! extension: PNG, or binary PPM for `.ppm` / `.pnm`.

use std::{fs, path::Path};

use image::ImageFormat;
use log::info;
use serde::Deserialize;

use crate::{error::OutputError, render::Frame};

/// File format of the images a render batch writes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Ppm,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Ppm => "ppm",
        }
    }
}

pub fn save_frame(frame: &Frame, path: &Path) -> Result<(), OutputError> {
    let format = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => ImageFormat::Png,
        Some("ppm") | Some("pnm") => ImageFormat::Pnm,
        _ => return Err(OutputError::UnsupportedFormat(path.to_path_buf())),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    frame
        .to_rgb8()
        .save_with_format(path, format)
        .map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    info!("Image saved to {}", path.display());
    Ok(())
}
