//! PNG swatch sheets for scanned palettes.
//!
//! One square cell per palette entry, laid out left to right in palette
//! order and wrapped every `SWATCH_COLUMNS` cells.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::engine::PaletteEntry;
use crate::error::{Result, RetintError};

/// Cells per row in a swatch sheet.
pub const SWATCH_COLUMNS: usize = 8;

/// Render a palette as an image with `cell`-pixel square swatches.
pub fn swatch_image(palette: &[PaletteEntry], cell: u32) -> RgbaImage {
    let cell = cell.max(1);
    let columns = palette.len().clamp(1, SWATCH_COLUMNS);
    let rows = palette.len().div_ceil(SWATCH_COLUMNS).max(1);

    let mut img: RgbaImage = ImageBuffer::new(columns as u32 * cell, rows as u32 * cell);

    for (i, entry) in palette.iter().enumerate() {
        let k = entry.key;
        let pixel = Rgba([k.r, k.g, k.b, k.a]);
        let x0 = (i % SWATCH_COLUMNS) as u32 * cell;
        let y0 = (i / SWATCH_COLUMNS) as u32 * cell;

        for y in y0..y0 + cell {
            for x in x0..x0 + cell {
                img.put_pixel(x, y, pixel);
            }
        }
    }

    img
}

/// Write a palette swatch sheet to a PNG file.
pub fn write_swatches(palette: &[PaletteEntry], path: &Path, cell: u32) -> Result<()> {
    if palette.is_empty() {
        return Err(RetintError::Selection {
            message: "No colours to write".to_string(),
            help: Some("The scanned selection has no visible solid, gradient or shadow colours".to_string()),
        });
    }

    swatch_image(palette, cell).save(path).map_err(|e| RetintError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })
}
