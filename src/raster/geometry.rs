//! Cell geometry shared by the compositor, the grid layout and the classifier.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::Rect;

/// One of the four fixed sub-regions of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];
}

impl std::fmt::Display for Quadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quadrant::TopLeft => write!(f, "top-left"),
            Quadrant::TopRight => write!(f, "top-right"),
            Quadrant::BottomLeft => write!(f, "bottom-left"),
            Quadrant::BottomRight => write!(f, "bottom-right"),
        }
    }
}

/// Size of one glyph cell and where its quadrants split.
///
/// The vertical split sits `midline_overlap` pixels right of the geometric
/// midline so the notation's centre stem, which straddles the midline,
/// falls on both sides of the split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellGeometry {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_overlap")]
    pub midline_overlap: u32,
}

fn default_overlap() -> u32 {
    1
}

impl CellGeometry {
    /// The 150x200 cell of the reference glyph set.
    pub const STANDARD: Self = Self {
        width: 150,
        height: 200,
        midline_overlap: 1,
    };

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 8 || self.height < 8 {
            return Err(ConfigError::InvalidGeometry {
                message: format!("cell {}x{} is smaller than 8x8", self.width, self.height),
            });
        }
        if self.width % 2 != 0 || self.height % 2 != 0 {
            return Err(ConfigError::InvalidGeometry {
                message: format!("cell {}x{} has an odd side", self.width, self.height),
            });
        }
        if self.midline_overlap >= self.width / 2 {
            return Err(ConfigError::InvalidGeometry {
                message: format!(
                    "midline overlap {} must be below half the width ({})",
                    self.midline_overlap,
                    self.width / 2
                ),
            });
        }
        Ok(())
    }

    /// Column where the right-hand quadrants begin.
    pub fn split_x(&self) -> u32 {
        self.width / 2 + self.midline_overlap
    }

    /// Row where the bottom quadrants begin.
    pub fn split_y(&self) -> u32 {
        self.height / 2
    }

    pub fn quadrant_rect(&self, quadrant: Quadrant) -> Rect {
        let sx = self.split_x();
        let sy = self.split_y();
        match quadrant {
            Quadrant::TopLeft => Rect::new(0, 0, sx, sy),
            Quadrant::TopRight => Rect::new(sx, 0, self.width - sx, sy),
            Quadrant::BottomLeft => Rect::new(0, sy, sx, self.height - sy),
            Quadrant::BottomRight => Rect::new(sx, sy, self.width - sx, self.height - sy),
        }
    }

    /// Pixel rectangle of cell `index` in a grid of `cols` columns, row-major.
    pub fn cell_rect(&self, index: usize, cols: usize) -> Rect {
        let col = (index % cols) as u32;
        let row = (index / cols) as u32;
        Rect::new(col * self.width, row * self.height, self.width, self.height)
    }
}

impl Default for CellGeometry {
    fn default() -> Self {
        Self::STANDARD
    }
}
