//! JSON reports printed by the debug tool.

use hexboard_core::{Direction, Edge, Grid, Tile, Vertex};
use serde::{Deserialize, Serialize};

/// Everything adjacent to a tile, trimmed to the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyReport {
    pub tile: Tile,
    pub inside: bool,
    /// Neighboring tiles that belong to the grid
    pub tiles: Vec<Tile>,
    /// Edges of the tile that touch the grid
    pub edges: Vec<Edge>,
    /// Corners of the tile that touch the grid
    pub vertexes: Vec<Vertex>,
}

impl AdjacencyReport {
    pub fn new(grid: &Grid, tile: Tile) -> Self {
        let mut tiles: Vec<Tile> = grid.retain_inside(tile.adjacent_tiles()).collect();
        tiles.sort_unstable();

        let mut edges: Vec<Edge> = tile
            .adjacent_edges()
            .into_iter()
            .filter(|e| grid.touches_edge(e))
            .collect();
        edges.sort_unstable();

        let mut vertexes: Vec<Vertex> = tile
            .adjacent_vertexes()
            .into_iter()
            .filter(|v| grid.touches_vertex(v))
            .collect();
        vertexes.sort_unstable();

        Self {
            tile,
            inside: grid.is_inside(tile),
            tiles,
            edges,
            vertexes,
        }
    }
}

/// Where a single step leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    pub from: Tile,
    pub direction: Direction,
    pub to: Tile,
    pub inside: bool,
}

impl MoveReport {
    pub fn new(grid: &Grid, from: Tile, direction: Direction) -> Self {
        let to = from.step(direction);
        Self {
            from,
            direction,
            to,
            inside: grid.is_inside(to),
        }
    }
}
