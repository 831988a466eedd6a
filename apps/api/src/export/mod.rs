// Document export: captures the rendered preview surface, slices it into
// fixed-size pages, and writes the pages into a PDF byte stream.
// Image decoding and PDF assembly are CPU-bound and run inside tokio::task::spawn_blocking.

pub mod document;
pub mod handlers;
pub mod paginator;
pub mod pipeline;
pub mod surface;

use thiserror::Error;

pub use paginator::PageGeometry;
pub use pipeline::ExportPipeline;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("render surface not available")]
    SurfaceUnavailable,

    #[error("invalid surface: {0}")]
    InvalidSurface(String),

    #[error("failed to decode surface image: {0}")]
    Decode(String),

    #[error("an export is already in progress")]
    InProgress,

    #[error("document assembly failed: {0}")]
    Document(String),

    #[error("export task failed: {0}")]
    Join(String),
}
