//! Texture declarations and the image-file probe
//!
//! A scene only records which image file a texture id names. Decoding and
//! upload belong to the host; the loader checks that the file name carries
//! an accepted extension and, depending on [`TextureProbe`], that the file
//! exists and its header decodes as PNG or JPEG.
//!
//! [`TextureProbe`]: crate::config::TextureProbe

use image::ImageFormat;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a texture file failed the probe
#[derive(Debug, Error)]
pub enum TextureFileError {
    #[error("invalid file: {0}")]
    InvalidName(String),
    #[error("invalid file extension: {0}")]
    InvalidExtension(String),
    #[error("unexisting file: {0}")]
    Missing(String),
    #[error("unreadable image {file}: {source}")]
    Unreadable {
        file: String,
        #[source]
        source: image::ImageError,
    },
}

/// A validated `<texture>` declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub id: String,
    /// File reference exactly as written in the document
    pub file: String,
    /// `file` resolved against the configured asset directory
    pub path: PathBuf,
    /// Image size when the probe succeeded
    pub dimensions: Option<(u32, u32)>,
    /// The probe ran and the file was missing or unreadable
    pub unavailable: bool,
}

impl Texture {
    pub fn new(id: &str, file: &str, asset_dir: Option<&Path>) -> Self {
        let path = match asset_dir {
            Some(dir) => dir.join(file),
            None => PathBuf::from(file),
        };

        Self {
            id: id.to_string(),
            file: file.to_string(),
            path,
            dimensions: None,
            unavailable: false,
        }
    }

    pub fn is_verified(&self) -> bool {
        self.dimensions.is_some()
    }

    /// False once the probe has shown there is no image to bind
    pub fn is_bindable(&self) -> bool {
        !self.unavailable
    }
}

/// Checks that `file` names a `.png` or `.jpg` image.
///
/// The name must hold at least one character before a 3 to 5 character
/// extension (dot included).
pub fn check_extension(file: &str) -> Result<ImageFormat, TextureFileError> {
    let Some(dot) = file.rfind('.') else {
        return Err(TextureFileError::InvalidName(file.to_string()));
    };
    let extension = &file[dot..];
    if dot == 0 || !(3..=5).contains(&extension.len()) {
        return Err(TextureFileError::InvalidName(file.to_string()));
    }

    match ImageFormat::from_extension(&extension[1..]) {
        Some(format @ (ImageFormat::Png | ImageFormat::Jpeg)) => Ok(format),
        _ => Err(TextureFileError::InvalidExtension(file.to_string())),
    }
}

/// Verifies the file exists and its header decodes, returning its size.
pub fn probe_texture_file(path: &Path) -> Result<(u32, u32), TextureFileError> {
    let display = path.display().to_string();
    if !path.is_file() {
        return Err(TextureFileError::Missing(display));
    }

    image::image_dimensions(path).map_err(|source| TextureFileError::Unreadable {
        file: display,
        source,
    })
}
