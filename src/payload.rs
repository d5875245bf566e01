use crate::error::{ProductSearchError, Result};
use base64::Engine;
use image::{ImageFormat, ImageReader};
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

/// Image bytes ready to be submitted for annotation
///
/// Construction checks that the bytes carry a recognised image header
/// with readable dimensions; pixels are not decoded.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    bytes: Vec<u8>,
    format: ImageFormat,
    width: u32,
    height: u32,
}

impl ImagePayload {
    /// Read an image file; the handle is closed before this returns
    pub fn open(path: &Path) -> Result<Self> {
        let origin = path.display().to_string();
        let file = File::open(path).map_err(|source| ProductSearchError::ImageRead {
            path: origin.clone(),
            source,
        })?;

        Self::from_reader(file, &origin)
    }

    /// Consume `reader`; it is dropped on every return path
    pub fn from_reader<R: Read>(mut reader: R, origin: &str) -> Result<Self> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|source| ProductSearchError::ImageRead {
                path: origin.to_string(),
                source,
            })?;
        drop(reader);

        Self::from_bytes(bytes, origin)
    }

    pub fn from_bytes(bytes: Vec<u8>, origin: &str) -> Result<Self> {
        let format = image::guess_format(&bytes)
            .map_err(|e| ProductSearchError::ImageDecode(format!("{}: {}", origin, e)))?;

        let (width, height) = ImageReader::with_format(Cursor::new(&bytes), format)
            .into_dimensions()
            .map_err(|e| ProductSearchError::ImageDecode(format!("{}: {}", origin, e)))?;

        Ok(Self {
            bytes,
            format,
            width,
            height,
        })
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }
}
