//! Grid layout of composed glyphs.
//!
//! Cells are placed row-major. The square layout uses `ceil(sqrt(n))`
//! columns; the single-row layout puts every cell in one row. Decoding never
//! needs to know which was used: columns come from the image width.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, RasterError};
use crate::raster::Raster;
use crate::raster::geometry::CellGeometry;

/// Result type for layout operations.
pub type LayoutResult<T> = std::result::Result<T, LayoutError>;

/// How cells are arranged when encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// Roughly square: `ceil(sqrt(n))` columns.
    #[default]
    Square,
    /// One row of `n` cells.
    SingleRow,
}

/// Smallest `c` with `c * c >= n`.
pub fn ceil_sqrt(n: usize) -> usize {
    let mut c = (n as f64).sqrt() as usize;
    while c * c < n {
        c += 1;
    }
    while c > 0 && (c - 1) * (c - 1) >= n {
        c -= 1;
    }
    c
}

/// `(cols, rows)` for `count` cells. `count` must be non-zero.
pub fn grid_shape(count: usize, mode: LayoutMode) -> (usize, usize) {
    let cols = match mode {
        LayoutMode::Square => ceil_sqrt(count),
        LayoutMode::SingleRow => count,
    }
    .max(1);
    (cols, count.div_ceil(cols))
}

/// Pixel size of a `cols` x `rows` grid, or `TooLarge` when a side overflows `u32`.
pub fn grid_size(cols: usize, rows: usize, geometry: CellGeometry) -> LayoutResult<(u32, u32)> {
    let side = |cells: usize, cell: u32| u32::try_from(cells).ok()?.checked_mul(cell);
    match (side(cols, geometry.width), side(rows, geometry.height)) {
        (Some(width), Some(height)) => Ok((width, height)),
        _ => Err(LayoutError::TooLarge {
            cols,
            rows,
            cell_width: geometry.width,
            cell_height: geometry.height,
        }),
    }
}

/// Paste glyphs into a background-filled grid.
pub fn layout(glyphs: &[Raster], geometry: CellGeometry, mode: LayoutMode) -> LayoutResult<Raster> {
    if glyphs.is_empty() {
        return Err(LayoutError::EmptyMessage);
    }
    let (cols, rows) = grid_shape(glyphs.len(), mode);
    let (width, height) = grid_size(cols, rows, geometry)?;
    let mut grid = Raster::blank(width, height);

    for (index, glyph) in glyphs.iter().enumerate() {
        if glyph.width() != geometry.width || glyph.height() != geometry.height {
            return Err(RasterError::SizeMismatch {
                expected_width: geometry.width,
                expected_height: geometry.height,
                actual_width: glyph.width(),
                actual_height: glyph.height(),
            }
            .into());
        }
        let rect = geometry.cell_rect(index, cols);
        grid.paste(glyph, rect.x, rect.y);
    }

    tracing::debug!(cells = glyphs.len(), cols, rows, ?mode, "laid out grid");
    Ok(grid)
}

/// Cut a grid back into its cells, row-major, padding cells included.
pub fn unlayout(grid: &Raster, geometry: CellGeometry) -> LayoutResult<Vec<Raster>> {
    let (width, height) = (grid.width(), grid.height());
    if width == 0
        || height == 0
        || width % geometry.width != 0
        || height % geometry.height != 0
    {
        return Err(LayoutError::NotAligned {
            width,
            height,
            cell_width: geometry.width,
            cell_height: geometry.height,
        });
    }
    let cols = (width / geometry.width) as usize;
    let rows = (height / geometry.height) as usize;

    let cells = (0..cols * rows)
        .map(|index| grid.crop(geometry.cell_rect(index, cols)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(cells)
}
