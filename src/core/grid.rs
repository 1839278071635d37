//! Coordinate transform between physical positions and the board grid.
//!
//! Stones at rest are stored on a discrete grid so that boards are exactly
//! representable in text and can be hashed structurally. The grid origin is
//! the left side wall at the hog line. Columns run across the sheet, rows
//! run from the hog line to one stone radius past the back line.
//!
//! ```
//! use rust_curling::core::{GridTransform, units};
//!
//! let grid = GridTransform::new(2.0);
//! let cell = grid.to_cell(units::BUTTON).unwrap();
//! assert_eq!(grid.to_real(cell), units::BUTTON);
//! ```

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::units::{BACK_LINE, HALF_ICE_WIDTH, HOG_LINE, ICE_WIDTH, STONE_RADIUS};

/// Round half up: ties go toward positive infinity.
///
/// `2.5` rounds to `3`, where banker's rounding would give `2`.
#[must_use]
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// A grid cell. Columns index across the sheet, rows along it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: u32,
    pub row: u32,
}

impl Cell {
    #[must_use]
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// A grid resolution that is zero, negative or not finite.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
#[error("grid resolution must be positive, got {0}")]
pub struct InvalidResolution(pub f64);

/// Bidirectional mapping between inches and grid cells.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct GridTransform {
    /// Cells per inch.
    resolution: f64,
}

#[derive(Deserialize)]
struct RawGrid {
    resolution: f64,
}

impl TryFrom<RawGrid> for GridTransform {
    type Error = InvalidResolution;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        GridTransform::try_new(raw.resolution)
    }
}

impl Default for GridTransform {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl GridTransform {
    /// Create a transform with the given number of cells per inch.
    pub fn new(resolution: f64) -> Self {
        assert!(
            resolution.is_finite() && resolution > 0.0,
            "Grid resolution must be positive"
        );
        Self { resolution }
    }

    /// Like [`GridTransform::new`], returning an error for a bad resolution.
    pub fn try_new(resolution: f64) -> Result<Self, InvalidResolution> {
        if resolution.is_finite() && resolution > 0.0 {
            Ok(Self { resolution })
        } else {
            Err(InvalidResolution(resolution))
        }
    }

    /// Cells per inch.
    #[must_use]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Highest valid column index.
    #[must_use]
    pub fn max_col(&self) -> u32 {
        round_half_up(ICE_WIDTH * self.resolution) as u32
    }

    /// Highest valid row index.
    #[must_use]
    pub fn max_row(&self) -> u32 {
        round_half_up((BACK_LINE + STONE_RADIUS - HOG_LINE) * self.resolution) as u32
    }

    /// Map a physical position to its grid cell.
    ///
    /// Returns `None` for positions off the grid (short of the hog line,
    /// beyond the boards or past the back line) and for non-finite input.
    #[must_use]
    pub fn to_cell(&self, position: DVec2) -> Option<Cell> {
        if !position.is_finite() {
            return None;
        }

        let col = round_half_up((position.x + HALF_ICE_WIDTH) * self.resolution);
        let row = round_half_up((position.y - HOG_LINE) * self.resolution);

        let col_ok = (0..=i64::from(self.max_col())).contains(&col);
        let row_ok = (0..=i64::from(self.max_row())).contains(&row);
        if col_ok && row_ok {
            Some(Cell::new(col as u32, row as u32))
        } else {
            None
        }
    }

    /// Map a grid cell back to the physical position of its center.
    #[must_use]
    pub fn to_real(&self, cell: Cell) -> DVec2 {
        DVec2::new(
            f64::from(cell.col) / self.resolution - HALF_ICE_WIDTH,
            f64::from(cell.row) / self.resolution + HOG_LINE,
        )
    }

    /// Snap a position to the center of its cell.
    #[must_use]
    pub fn snap(&self, position: DVec2) -> Option<DVec2> {
        self.to_cell(position).map(|cell| self.to_real(cell))
    }
}
