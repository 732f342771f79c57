//! # Company Logo
//!
//! Loads the optional logo as raw RGB pixels, compressed and ready to embed
//! as a PDF image.
//!
//! A logo is decoration. A missing, unreadable or undecodable file is
//! logged and the document is rendered without it.

use std::path::Path;

use miniz_oxide::deflate::compress_to_vec_zlib;
use tracing::{debug, warn};

use crate::document::LogoSize;

/// A decoded logo image.
#[derive(Debug, Clone)]
pub struct Logo {
    width_px: u32,
    height_px: u32,
    /// Zlib-compressed 8-bit RGB samples.
    data: Vec<u8>,
}

impl Logo {
    /// Loads a logo from disk, or `None` if it cannot be used.
    pub fn load(path: &Path) -> Option<Logo> {
        if !path.exists() {
            warn!(path = %path.display(), "Logo file not found, rendering without logo");
            return None;
        }

        match Self::decode(path) {
            Ok(logo) => {
                debug!(
                    path = %path.display(),
                    width = logo.width_px,
                    height = logo.height_px,
                    "Loaded logo"
                );
                Some(logo)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load logo, rendering without logo");
                None
            }
        }
    }

    fn decode(path: &Path) -> Result<Logo, image::ImageError> {
        let img = image::ImageReader::open(path)?
            .with_guessed_format()?
            .decode()?;
        let rgb = img.to_rgb8();
        Ok(Logo::from_rgb(rgb.width(), rgb.height(), rgb.as_raw()))
    }

    /// Builds a logo from uncompressed RGB samples.
    pub fn from_rgb(width_px: u32, height_px: u32, rgb: &[u8]) -> Logo {
        Logo {
            width_px,
            height_px,
            data: compress_to_vec_zlib(rgb, 6),
        }
    }

    pub fn size(&self) -> LogoSize {
        LogoSize {
            width_px: self.width_px,
            height_px: self.height_px,
        }
    }

    pub fn compressed_data(&self) -> &[u8] {
        &self.data
    }
}
