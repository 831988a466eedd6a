//! Raster surfaces produced by the external document renderer.
//!
//! The export pipeline only sees `SurfaceSource::capture`, so tests can feed it
//! synthetic images and production can feed it whatever the renderer uploads.

use async_trait::async_trait;
use bytes::Bytes;
use image::RgbImage;
use tracing::debug;

use crate::export::ExportError;

/// A fully rendered preview, RGB8.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbImage,
}

impl RasterSurface {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn pixel_width(&self) -> u32 {
        self.image.width()
    }

    pub fn pixel_height(&self) -> u32 {
        self.image.height()
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

/// Capability to obtain the current rendered surface.
#[async_trait]
pub trait SurfaceSource: Send + Sync {
    async fn capture(&self) -> Result<RasterSurface, ExportError>;
}

/// An encoded image (PNG, JPEG, …) handed over by the renderer.
/// `None` models a renderer that had no surface to give.
pub struct EncodedSurface {
    bytes: Option<Bytes>,
}

impl EncodedSurface {
    pub fn new(bytes: Option<Bytes>) -> Self {
        Self { bytes }
    }
}

#[async_trait]
impl SurfaceSource for EncodedSurface {
    async fn capture(&self) -> Result<RasterSurface, ExportError> {
        let bytes = match &self.bytes {
            Some(b) if !b.is_empty() => b.clone(),
            _ => return Err(ExportError::SurfaceUnavailable),
        };

        let surface = tokio::task::spawn_blocking(move || decode_surface(&bytes))
            .await
            .map_err(|e| ExportError::Join(format!("surface decode task failed: {e}")))??;

        debug!(
            width = surface.pixel_width(),
            height = surface.pixel_height(),
            "Surface decoded"
        );
        Ok(surface)
    }
}

/// An already decoded surface, captured as-is.
#[allow(dead_code)]
pub struct StaticSurface(pub Option<RasterSurface>);

#[async_trait]
impl SurfaceSource for StaticSurface {
    async fn capture(&self) -> Result<RasterSurface, ExportError> {
        self.0.clone().ok_or(ExportError::SurfaceUnavailable)
    }
}

fn decode_surface(bytes: &[u8]) -> Result<RasterSurface, ExportError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| ExportError::Decode(e.to_string()))?;
    Ok(RasterSurface::new(decoded.to_rgb8()))
}
