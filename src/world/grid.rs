//! Bordered tile grid the rays traverse.
//!
//! Three layers per cell: wall id (0 = passable), ceiling texture id
//! (0 = open sky) and floor texture id.  The outer ring must be solid so
//! DDA traversal always terminates without a range check per step.

use once_cell::sync::Lazy;

/// Identifier of a wall / flat texture inside an atlas.  0 means "none".
pub type TileId = u8;

/// One grid cell: wall layer plus the two flat layers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub wall: TileId,
    pub ceiling: TileId,
    pub floor: TileId,
}

/// Things that can go wrong when building a grid.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GridError {
    /// A grid needs at least one walkable cell inside the border.
    #[error("grid {0}x{1} is too small (minimum 3x3)")]
    TooSmall(usize, usize),

    /// Cell vector length does not match the declared dimensions.
    #[error("expected {expected} cells, got {got}")]
    CellCountMismatch { expected: usize, got: usize },

    /// The outer ring must be solid or rays could escape the map.
    #[error("border cell ({0}, {1}) has wall id 0")]
    OpenBorder(usize, usize),
}

/// Immutable-after-build 2-D lookup of [`Cell`]s, row-major in `y`.
///
/// Shared read-only by the simulation (collision probes) and the
/// raycaster (DDA traversal, flat texture ids).
#[derive(Clone, Debug)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl TileGrid {
    /// Build a grid from `width * height` cells (indexed `x + y * width`),
    /// validating the solid-border invariant.
    pub fn new(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, GridError> {
        if width < 3 || height < 3 {
            return Err(GridError::TooSmall(width, height));
        }
        if cells.len() != width * height {
            return Err(GridError::CellCountMismatch {
                expected: width * height,
                got: cells.len(),
            });
        }
        let grid = Self {
            width,
            height,
            cells,
        };
        for x in 0..width {
            for y in 0..height {
                let on_border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                if on_border && grid.cell(x, y).wall == 0 {
                    return Err(GridError::OpenBorder(x, y));
                }
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Upper bound on DDA steps for any ray starting inside the border.
    #[inline]
    pub fn diameter(&self) -> usize {
        self.width + self.height
    }

    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        debug_assert!(x < self.width && y < self.height);
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        &self.cells[x + y * self.width]
    }

    /// Signed-coordinate cell lookup.  Out-of-range coordinates are a
    /// programming error (the border makes them unreachable from inside);
    /// release builds clamp instead of panicking.
    #[inline]
    pub fn cell_signed(&self, x: i32, y: i32) -> &Cell {
        debug_assert!(x >= 0 && y >= 0);
        self.cell_clamped(x, y)
    }

    /// Clamping lookup for samplers whose rays legitimately overshoot the
    /// map, such as far floor rows; border cells answer for everything
    /// beyond them.
    #[inline]
    pub fn cell_clamped(&self, x: i32, y: i32) -> &Cell {
        let x = x.clamp(0, self.width as i32 - 1) as usize;
        let y = y.clamp(0, self.height as i32 - 1) as usize;
        &self.cells[x + y * self.width]
    }

    /// Wall id at signed coordinates, clamped into range.
    #[inline]
    pub fn wall_at(&self, x: i32, y: i32) -> TileId {
        self.cell_signed(x, y).wall
    }

    /// True if the cell carries no wall (the camera may stand in it).
    #[inline]
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.wall_at(x, y) == 0
    }

    /// The built-in 24x24 arcade map: walls 1-5, floor everywhere, ceiling
    /// over the maze half and open sky over the rest.
    pub fn demo() -> TileGrid {
        DEMO.clone()
    }
}

/// Wall layer of the demo map, indexed `[x][y]`.
#[rustfmt::skip]
const DEMO_WALLS: [[TileId; 24]; 24] = [
    [1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,2,2,2,2,2,0,0,0,0,3,0,3,0,3,0,0,0,1],
    [1,0,0,0,0,0,2,0,0,0,2,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,2,0,0,0,2,0,0,0,0,3,0,0,0,3,0,0,0,1],
    [1,0,0,0,0,0,2,0,0,0,2,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,2,2,0,2,2,0,0,0,0,3,0,3,0,3,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,4,4,4,4,4,4,4,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,4,0,4,0,0,0,0,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,4,0,0,0,0,5,0,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,4,0,4,0,0,0,0,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,4,0,4,4,4,4,4,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,4,4,4,4,4,4,4,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1],
];

static DEMO: Lazy<TileGrid> = Lazy::new(|| {
    let (w, h) = (24usize, 24usize);
    let mut cells = vec![Cell::default(); w * h];
    for x in 0..w {
        for y in 0..h {
            cells[x + y * w] = Cell {
                wall: DEMO_WALLS[x][y],
                // the maze half gets a roof, the arena half is open sky
                ceiling: if x >= 16 { 1 } else { 0 },
                floor: 1,
            };
        }
    }
    TileGrid::new(w, h, cells).expect("demo map is well-formed")
});

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    fn bordered(w: usize, h: usize) -> Vec<Cell> {
        let mut cells = vec![Cell::default(); w * h];
        for x in 0..w {
            for y in 0..h {
                if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                    cells[x + y * w].wall = 1;
                }
            }
        }
        cells
    }

    #[test]
    fn builds_bordered_grid() {
        let grid = TileGrid::new(5, 4, bordered(5, 4)).unwrap();
        assert_eq!(grid.wall_at(0, 0), 1);
        assert_eq!(grid.wall_at(2, 1), 0);
        assert!(grid.is_walkable(2, 2));
        assert!(!grid.is_walkable(4, 2));
    }

    #[test]
    fn open_border_rejected() {
        let mut cells = bordered(4, 4);
        cells[2] = Cell::default(); // hole at (2, 0)
        let err = TileGrid::new(4, 4, cells).unwrap_err();
        assert_eq!(err, GridError::OpenBorder(2, 0));
    }

    #[test]
    fn wrong_cell_count_rejected() {
        let err = TileGrid::new(4, 4, bordered(4, 3)).unwrap_err();
        assert_eq!(
            err,
            GridError::CellCountMismatch {
                expected: 16,
                got: 12
            }
        );
    }

    #[test]
    fn too_small_rejected() {
        assert_eq!(
            TileGrid::new(2, 4, bordered(2, 4)).unwrap_err(),
            GridError::TooSmall(2, 4)
        );
    }

    #[test]
    fn demo_map_is_valid() {
        let demo = TileGrid::demo();
        assert_eq!(demo.width(), 24);
        assert_eq!(demo.height(), 24);
        // camera spawn cell must be open
        assert!(demo.is_walkable(22, 12));
        // maze half has a ceiling, arena half has sky
        assert_ne!(demo.cell(18, 2).ceiling, 0);
        assert_eq!(demo.cell(2, 2).ceiling, 0);
    }
}
