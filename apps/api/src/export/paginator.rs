//! Print-style pagination of a single tall raster.
//!
//! The raster is scaled uniformly to the page width. Every page shows the whole
//! image shifted up by one page height more than the page before it, so each page
//! is a window onto the same image. Nothing is re-flowed: a line of text that
//! straddles a page boundary is cut in two.
//!
//! Example: 1000×4000 px at 210 mm wide → 840 mm tall → pages at 0, −295, −590 mm.

use serde::{Deserialize, Serialize};

use crate::export::ExportError;

pub const DEFAULT_PAGE_WIDTH_MM: f32 = 210.0;
pub const DEFAULT_PAGE_HEIGHT_MM: f32 = 295.0;

/// Fixed output page size in millimetres (portrait).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_width_mm: DEFAULT_PAGE_WIDTH_MM,
            page_height_mm: DEFAULT_PAGE_HEIGHT_MM,
        }
    }
}

/// Where the raster sits on one output page.
///
/// `offset_y_mm` is the distance from the page top to the image top; it is zero
/// on the first page and negative afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PagePlacement {
    pub page_number: usize,
    pub offset_y_mm: f32,
    pub image_width_mm: f32,
    pub image_height_mm: f32,
}

pub fn paginate(
    pixel_width: u32,
    pixel_height: u32,
    geometry: &PageGeometry,
) -> Result<Vec<PagePlacement>, ExportError> {
    if pixel_width == 0 {
        return Err(ExportError::InvalidSurface(
            "surface has zero width".to_string(),
        ));
    }

    let image_width_mm = geometry.page_width_mm;
    let image_height_mm = pixel_height as f32 * geometry.page_width_mm / pixel_width as f32;
    let page_height = geometry.page_height_mm;

    let place = |page_number: usize, offset_y_mm: f32| PagePlacement {
        page_number,
        offset_y_mm,
        image_width_mm,
        image_height_mm,
    };

    let mut position = 0.0_f32;
    let mut height_left = image_height_mm;
    let mut pages = vec![place(1, position)];

    // An image exactly N pages tall still gets a trailing blank window.
    while height_left - page_height >= 0.0 {
        position -= page_height;
        height_left -= page_height;
        pages.push(place(pages.len() + 1, position));
    }

    Ok(pages)
}
