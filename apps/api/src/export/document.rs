//! PDF assembly using `printpdf` 0.8.
//!
//! The raster is registered once as an image XObject and referenced from every
//! page; each page only differs in where the image is translated to. Placements
//! use a top-left origin, PDF uses bottom-left, so the y translation is
//! `page_height − offset − image_height`.

use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, warn};

use crate::export::paginator::{PageGeometry, PagePlacement};
use crate::export::surface::RasterSurface;
use crate::export::ExportError;

const MM_PER_INCH: f32 = 25.4;

pub fn render_pdf(
    surface: RasterSurface,
    placements: &[PagePlacement],
    geometry: &PageGeometry,
    title: &str,
) -> Result<Vec<u8>, ExportError> {
    let Some(first) = placements.first() else {
        return Err(ExportError::Document("no pages to render".to_string()));
    };

    let pixel_width = surface.pixel_width();
    let pixel_height = surface.pixel_height();
    if pixel_width == 0 || pixel_height == 0 {
        return Err(ExportError::InvalidSurface(format!(
            "cannot place a {pixel_width}×{pixel_height} surface"
        )));
    }

    // Pick the DPI at which the raster's native width equals the placed width,
    // so no further scaling is needed.
    let dpi = pixel_width as f32 * MM_PER_INCH / first.image_width_mm;

    let raw = RawImage {
        pixels: RawImageData::U8(surface.into_image().into_raw()),
        width: pixel_width as usize,
        height: pixel_height as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    };

    let mut doc = PdfDocument::new(title);
    let image_id = doc.add_image(&raw);

    let page_w = Mm(geometry.page_width_mm);
    let page_h = Mm(geometry.page_height_mm);

    let pages: Vec<PdfPage> = placements
        .iter()
        .map(|placement| {
            let bottom_mm =
                geometry.page_height_mm - placement.offset_y_mm - placement.image_height_mm;
            let ops = vec![Op::UseXobject {
                id: image_id.clone(),
                transform: XObjectTransform {
                    translate_x: Some(Pt(0.0)),
                    translate_y: Some(Mm(bottom_mm).into_pt()),
                    scale_x: Some(1.0),
                    scale_y: Some(1.0),
                    dpi: Some(dpi),
                    rotate: None,
                },
            }];
            PdfPage::new(page_w, page_h, ops)
        })
        .collect();

    doc.with_pages(pages);

    let mut warnings: Vec<PdfWarnMsg> = Vec::new();
    let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        warn!(count = warnings.len(), "PDF serialisation produced warnings");
    }

    debug!(
        pages = placements.len(),
        bytes = output.len(),
        dpi,
        "PDF assembled"
    );
    Ok(output)
}
