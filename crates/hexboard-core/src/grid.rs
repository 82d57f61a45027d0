//! Bounded hexagonal grid.
//!
//! A `Grid` is the set of tiles within a fixed hex distance of the origin. It
//! answers membership queries so callers can trim the unbounded adjacency
//! results of [`hex`](crate::hex) to the board, and it carries a set of
//! marked tiles used when rendering the grid for debugging.

use crate::hex::{Edge, GeometryError, Tile, Vertex};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, trace};

/// Hexagon-shaped grid of every tile within `radius` steps of the origin
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "GridSpec", into = "GridSpec")]
pub struct Grid {
    /// Between 0 and `MAX_RADIUS`
    radius: i32,
    /// Tiles in row-major order (q, then r)
    tiles: Vec<Tile>,
    /// Same tiles, for membership queries
    lookup: HashSet<Tile>,
    /// Tiles highlighted when rendering
    marks: HashSet<Tile>,
}

/// What a grid serializes as: the tile set is derived from the radius
#[derive(Serialize, Deserialize)]
struct GridSpec {
    radius: u32,
    #[serde(default)]
    marks: Vec<Tile>,
}

impl Grid {
    /// Largest radius a grid can be built with (3,148,801 tiles)
    pub const MAX_RADIUS: u32 = 1024;

    /// Create a grid containing every tile within `radius` of the origin
    pub fn new(radius: u32) -> Result<Self, GeometryError> {
        let too_large = || GeometryError::RadiusTooLarge {
            radius,
            max: Self::MAX_RADIUS,
        };
        if radius > Self::MAX_RADIUS {
            return Err(too_large());
        }
        let radius = i32::try_from(radius).map_err(|_| too_large())?;

        let tiles: Vec<Tile> = Self::row_range(radius)
            .flat_map(|q| Self::column_range(radius, q).map(move |r| Tile::new(q, r)))
            .collect();
        let lookup = tiles.iter().copied().collect();

        debug!(radius, tiles = tiles.len(), "Created hex grid");

        Ok(Self {
            radius,
            tiles,
            lookup,
            marks: HashSet::new(),
        })
    }

    /// Rows (q values) present in a grid of this radius
    fn row_range(radius: i32) -> std::ops::RangeInclusive<i32> {
        -radius..=radius
    }

    /// Columns (r values) present in row `q`
    fn column_range(radius: i32, q: i32) -> std::ops::RangeInclusive<i32> {
        (-radius).max(-q - radius)..=radius.min(-q + radius)
    }

    /// Distance from the center to the outermost ring
    pub fn radius(&self) -> u32 {
        self.radius.unsigned_abs()
    }

    /// Number of tiles in the grid
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// A grid always holds at least its center tile
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All tiles, row by row (increasing q, then increasing r)
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles.iter().copied()
    }

    /// Whether `tile` belongs to this grid
    pub fn is_inside(&self, tile: Tile) -> bool {
        self.lookup.contains(&tile)
    }

    /// Whether both tiles of `edge` belong to this grid
    pub fn contains_edge(&self, edge: &Edge) -> bool {
        edge.tiles().iter().all(|t| self.is_inside(*t))
    }

    /// Whether all three tiles of `vertex` belong to this grid
    pub fn contains_vertex(&self, vertex: &Vertex) -> bool {
        vertex.tiles().iter().all(|t| self.is_inside(*t))
    }

    /// Whether `edge` lies on or inside the grid border
    pub fn touches_edge(&self, edge: &Edge) -> bool {
        edge.tiles().iter().any(|t| self.is_inside(*t))
    }

    /// Whether `vertex` lies on or inside the grid border
    pub fn touches_vertex(&self, vertex: &Vertex) -> bool {
        vertex.tiles().iter().any(|t| self.is_inside(*t))
    }

    /// Keep only the tiles that belong to this grid
    pub fn retain_inside<'a, I>(&'a self, tiles: I) -> impl Iterator<Item = Tile> + 'a
    where
        I: IntoIterator<Item = Tile>,
        I::IntoIter: 'a,
    {
        tiles.into_iter().filter(move |t| self.is_inside(*t))
    }

    /// Highlight a tile in the rendering. Returns false if it was already marked.
    pub fn mark(&mut self, tile: Tile) -> bool {
        trace!(%tile, "Marking tile");
        self.marks.insert(tile)
    }

    /// Remove a highlight. Returns false if the tile was not marked.
    pub fn unmark(&mut self, tile: Tile) -> bool {
        trace!(%tile, "Unmarking tile");
        self.marks.remove(&tile)
    }

    /// Remove every highlight
    pub fn clear_marks(&mut self) {
        trace!(count = self.marks.len(), "Clearing marks");
        self.marks.clear();
    }

    /// Whether `tile` is highlighted
    pub fn is_marked(&self, tile: Tile) -> bool {
        self.marks.contains(&tile)
    }

    /// All highlighted tiles, including any outside the grid
    pub fn marks(&self) -> impl Iterator<Item = Tile> + '_ {
        self.marks.iter().copied()
    }

    /// ASCII-art rendering of the grid, one row of boxes per q value
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

/// Coordinate padded so single-digit numbers keep the same width whatever their sign
fn padded(n: i32) -> String {
    if n >= 0 {
        format!(" {n}")
    } else {
        n.to_string()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for q in Self::row_range(self.radius) {
            let indent = " ".repeat(3 * (self.radius() + q.unsigned_abs()) as usize);
            let row = Self::column_range(self.radius, q);

            write!(f, "\n{indent}")?;
            for r in row.clone() {
                let cell = if self.is_marked(Tile::new(q, r)) {
                    "╔     ╗"
                } else {
                    "┌     ┐"
                };
                f.write_str(cell)?;
            }

            write!(f, "\n{indent}")?;
            for r in row.clone() {
                let border = if self.is_marked(Tile::new(q, r)) { '║' } else { '│' };
                write!(f, "{border}{},{}{border}", padded(q), padded(r))?;
            }

            write!(f, "\n{indent}")?;
            for r in row {
                let cell = if self.is_marked(Tile::new(q, r)) {
                    "╚     ╝"
                } else {
                    "└     ┘"
                };
                f.write_str(cell)?;
            }
        }
        Ok(())
    }
}

impl TryFrom<GridSpec> for Grid {
    type Error = GeometryError;

    fn try_from(spec: GridSpec) -> Result<Self, Self::Error> {
        let mut grid = Grid::new(spec.radius)?;
        grid.marks.extend(spec.marks);
        Ok(grid)
    }
}

impl From<Grid> for GridSpec {
    fn from(grid: Grid) -> Self {
        let radius = grid.radius();
        let mut marks: Vec<Tile> = grid.marks.into_iter().collect();
        marks.sort_unstable();
        GridSpec {
            radius,
            marks,
        }
    }
}
