//! Capture → paginate → render, one export at a time.
//!
//! Both steps read the same live preview surface, so a second request that arrives
//! while an export is in flight is rejected rather than interleaved. There is no
//! retry and no partial output: any failure ends the export.

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::export::document::render_pdf;
use crate::export::paginator::{paginate, PageGeometry};
use crate::export::surface::SurfaceSource;
use crate::export::ExportError;

#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub file_name: String,
    pub page_count: usize,
    pub bytes: Vec<u8>,
}

pub struct ExportPipeline {
    geometry: PageGeometry,
    in_flight: Mutex<()>,
}

impl ExportPipeline {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            in_flight: Mutex::new(()),
        }
    }

    /// `identity` names the document, e.g. `Ada_Lovelace_Resume`; the file gets a `.pdf` suffix.
    pub async fn export(
        &self,
        source: &dyn SurfaceSource,
        identity: &str,
    ) -> Result<ExportedDocument, ExportError> {
        let _guard = self.in_flight.try_lock().map_err(|_| {
            warn!(identity, "Rejected export: another export is in flight");
            ExportError::InProgress
        })?;

        info!(identity, "Export started");
        let surface = source.capture().await?;

        let geometry = self.geometry;
        let title = identity.to_string();
        let (page_count, bytes) = tokio::task::spawn_blocking(move || {
            let placements = paginate(surface.pixel_width(), surface.pixel_height(), &geometry)?;
            let bytes = render_pdf(surface, &placements, &geometry, &title)?;
            Ok::<_, ExportError>((placements.len(), bytes))
        })
        .await
        .map_err(|e| ExportError::Join(format!("export task failed: {e}")))??;

        info!(identity, page_count, bytes = bytes.len(), "Export finished");
        Ok(ExportedDocument {
            file_name: format!("{identity}.pdf"),
            page_count,
            bytes,
        })
    }
}
