//! Hexboard - hex grid geometry for the Kopiatan board game
//!
//! This crate provides the spatial substrate of the board:
//! - Tiles (terrain hexes) in axial coordinates
//! - Edges (road slots) and vertices (settlement slots) derived from tile adjacency
//! - A bounded grid of tiles with membership queries and debug rendering
//!
//! # Architecture
//!
//! Tiles are the only source of adjacency. Edges and vertices are identified by
//! the tiles that meet at them and validated when constructed, so an invalid
//! edge or vertex can never exist. None of the geometry depends on a grid size:
//! callers trim results to a board with [`Grid`] membership queries.
//!
//! # Modules
//!
//! - [`hex`]: Tiles, edges, vertices and their adjacency
//! - [`grid`]: Bounded grid of tiles

pub mod grid;
pub mod hex;

// Re-export commonly used types
pub use grid::Grid;
pub use hex::{Direction, Edge, Feature, GeometryError, Tile, Vertex};
