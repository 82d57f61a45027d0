//! Hex coordinate system using axial coordinates (q, r).
//!
//! This module provides the geometry the board is built on:
//! - `Tile`: a single hex cell (terrain)
//! - `Edge`: the side shared by two adjacent tiles (where roads go)
//! - `Vertex`: the corner shared by three mutually adjacent tiles (where settlements go)
//!
//! Edges and vertices are not stored anywhere; they are identified by the tiles
//! that meet at them and derived on demand from tile adjacency. Every adjacency
//! query is answered with the same primitive: intersecting the neighbor sets of
//! a group of tiles.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised by geometry construction and queries
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GeometryError {
    #[error("An edge needs exactly 2 distinct adjacent tiles")]
    InvalidEdge,

    #[error("A vertex needs exactly 3 distinct, pairwise adjacent tiles")]
    InvalidVertex,

    #[error("Adjacency is undefined for this set of tiles")]
    InvalidAdjacencyQuery,

    #[error("Unknown direction: {0}")]
    UnknownDirection(String),

    #[error("Invalid tile: {0}")]
    InvalidTile(String),

    #[error("Tile {0} is outside the supported coordinate range")]
    OutOfRange(Tile),

    #[error("Grid radius {radius} exceeds the maximum of {max}")]
    RadiusTooLarge { radius: u32, max: u32 },
}

/// Axial offsets of the six neighbors, in the order they are generated.
const NEIGHBOR_OFFSETS: [Tile; 6] = [
    Tile::new(1, 0),
    Tile::new(0, 1),
    Tile::new(-1, 1),
    Tile::new(-1, 0),
    Tile::new(0, -1),
    Tile::new(1, -1),
];

/// Direction from a tile to one of its neighbors.
///
/// Named after the debug rendering of a [`Grid`](crate::grid::Grid): rows are `q`
/// (growing downward) and columns are `r` (growing to the right), with each row
/// below the center shifted half a tile to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Right, same row
    East,
    /// Down and to the right
    SouthEast,
    /// Down and to the left
    SouthWest,
    /// Left, same row
    West,
    /// Up and to the left
    NorthWest,
    /// Up and to the right
    NorthEast,
}

impl Direction {
    /// All directions in clockwise order starting from East
    pub const ALL: [Direction; 6] = [
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::NorthEast,
    ];

    /// Axial offset of one step in this direction
    pub const fn offset(self) -> Tile {
        match self {
            Direction::East => Tile::new(0, 1),
            Direction::SouthEast => Tile::new(1, 0),
            Direction::SouthWest => Tile::new(1, -1),
            Direction::West => Tile::new(0, -1),
            Direction::NorthWest => Tile::new(-1, 0),
            Direction::NorthEast => Tile::new(-1, 1),
        }
    }

    /// The direction pointing back the way this one came
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
            Direction::NorthEast => Direction::SouthWest,
        }
    }

    /// Short name as accepted by [`FromStr`]
    pub const fn short_name(self) -> &'static str {
        match self {
            Direction::East => "r",
            Direction::SouthEast => "br",
            Direction::SouthWest => "bl",
            Direction::West => "l",
            Direction::NorthWest => "tl",
            Direction::NorthEast => "tr",
        }
    }
}

impl FromStr for Direction {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        match name.as_str() {
            "r" | "e" | "east" => Ok(Direction::East),
            "br" | "se" | "southeast" => Ok(Direction::SouthEast),
            "bl" | "sw" | "southwest" => Ok(Direction::SouthWest),
            "l" | "w" | "west" => Ok(Direction::West),
            "tl" | "nw" | "northwest" => Ok(Direction::NorthWest),
            "tr" | "ne" | "northeast" => Ok(Direction::NorthEast),
            _ => Err(GeometryError::UnknownDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Axial coordinate of a hex tile.
///
/// The third cube coordinate `s` is never stored; it is always derived so that
/// `q + r + s == 0` holds by construction.
///
/// Geometry is supported for tiles whose `q` and `r` lie within
/// `±`[`Tile::MAX_COORD`]: there `s` and every neighbor are representable.
/// Parsing and deserialization reject anything further out.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(try_from = "RawTile")]
pub struct Tile {
    /// Row in the debug rendering
    pub q: i32,
    /// Column in the debug rendering
    pub r: i32,
}

impl Tile {
    /// The center of every grid
    pub const ORIGIN: Tile = Tile::new(0, 0);

    /// Largest magnitude of `q` or `r` the geometry supports
    pub const MAX_COORD: i32 = (1 << 30) - 1;

    /// Create a new tile coordinate
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Create a tile, rejecting coordinates outside the supported range
    pub fn checked_new(q: i32, r: i32) -> Result<Self, GeometryError> {
        let tile = Self::new(q, r);
        if tile.is_in_range() {
            Ok(tile)
        } else {
            Err(GeometryError::OutOfRange(tile))
        }
    }

    /// Whether both coordinates are within `±MAX_COORD`
    pub const fn is_in_range(&self) -> bool {
        self.q.unsigned_abs() <= Self::MAX_COORD as u32
            && self.r.unsigned_abs() <= Self::MAX_COORD as u32
    }

    /// The implicit third coordinate (s = -q - r)
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Distance to another tile in hex steps. Defined for any pair of tiles.
    pub fn distance_to(&self, other: Tile) -> u64 {
        let dq = i64::from(self.q) - i64::from(other.q);
        let dr = i64::from(self.r) - i64::from(other.r);
        (dq.unsigned_abs() + dr.unsigned_abs() + (dq + dr).unsigned_abs()) / 2
    }

    /// The six neighboring tiles in generation order
    pub fn neighbors(&self) -> [Tile; 6] {
        NEIGHBOR_OFFSETS.map(|offset| *self + offset)
    }

    /// Whether this tile is adjacent to a tile, edge or vertex.
    ///
    /// Two tiles are adjacent when they are exactly one step apart, so a tile is
    /// never adjacent to itself. A tile is adjacent to an edge or vertex when it
    /// is one of the tiles meeting there.
    pub fn is_adjacent(&self, other: impl Into<Feature>) -> bool {
        match other.into() {
            Feature::Tile(tile) => self.distance_to(tile) == 1,
            Feature::Edge(edge) => edge.contains(*self),
            Feature::Vertex(vertex) => vertex.contains(*self),
        }
    }

    /// The six neighboring tiles. No board boundary is applied.
    pub fn adjacent_tiles(&self) -> HashSet<Tile> {
        self.neighbors().into_iter().collect()
    }

    /// The six edges of this tile, one per neighbor
    pub fn adjacent_edges(&self) -> HashSet<Edge> {
        self.neighbors()
            .into_iter()
            .map(|neighbor| Edge::pair(*self, neighbor))
            .collect()
    }

    /// The six corners of this tile.
    ///
    /// Every pair of neighbors that are themselves adjacent closes a corner
    /// together with this tile.
    pub fn adjacent_vertexes(&self) -> HashSet<Vertex> {
        let neighbors = self.neighbors();
        let mut vertexes = HashSet::new();
        for (i, a) in neighbors.iter().enumerate() {
            for b in &neighbors[i + 1..] {
                if a.is_adjacent(*b) {
                    vertexes.insert(Vertex::triple(*self, *a, *b));
                }
            }
        }
        vertexes
    }

    /// Tiles adjacent to every tile in `tiles` (their common neighbors).
    ///
    /// A single tile yields its six neighbors. An empty input has no defined
    /// result and is rejected.
    pub fn get_all_adjacent<I>(tiles: I) -> Result<HashSet<Tile>, GeometryError>
    where
        I: IntoIterator,
        I::Item: Borrow<Tile>,
    {
        let mut tiles = tiles.into_iter();
        let first = tiles.next().ok_or(GeometryError::InvalidAdjacencyQuery)?;
        let mut common = first.borrow().adjacent_tiles();
        for tile in tiles {
            let tile = *tile.borrow();
            common.retain(|candidate| candidate.is_adjacent(tile));
        }
        Ok(common)
    }

    /// Whether every pair of distinct tiles in `tiles` is adjacent.
    ///
    /// Duplicates are ignored. No edge or vertex has more than 3 tiles, so
    /// larger sets are never all adjacent. A single tile is rejected since
    /// adjacency needs two.
    pub fn are_all_adjacent<I>(tiles: I) -> Result<bool, GeometryError>
    where
        I: IntoIterator,
        I::Item: Borrow<Tile>,
    {
        let tiles: HashSet<Tile> = tiles.into_iter().map(|t| *t.borrow()).collect();
        match tiles.len() {
            0 => Ok(true),
            1 => Err(GeometryError::InvalidAdjacencyQuery),
            n if n > 3 => Ok(false),
            _ => Ok(tiles
                .iter()
                .all(|a| tiles.iter().all(|b| a == b || a.is_adjacent(*b)))),
        }
    }

    /// The neighbor one step away in `direction`
    pub fn step(&self, direction: Direction) -> Tile {
        *self + direction.offset()
    }

    /// Step in a direction given by name (see [`Direction`]'s `FromStr`)
    pub fn move_named(&self, direction: &str) -> Result<Tile, GeometryError> {
        Ok(self.step(direction.parse()?))
    }
}

impl Add for Tile {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.q + other.q, self.r + other.r)
    }
}

impl Sub for Tile {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.q - other.q, self.r - other.r)
    }
}

impl Neg for Tile {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.q, -self.r)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Parses `"q,r"`, optionally wrapped in parentheses
impl FromStr for Tile {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GeometryError::InvalidTile(s.to_string());
        let inner = s.trim();
        let inner = inner
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(inner);

        let (q, r) = inner.split_once(',').ok_or_else(invalid)?;
        let q = q.trim().parse().map_err(|_| invalid())?;
        let r = r.trim().parse().map_err(|_| invalid())?;
        Tile::checked_new(q, r)
    }
}

/// Unvalidated tile as it appears on the wire
#[derive(Deserialize)]
struct RawTile {
    q: i32,
    r: i32,
}

impl TryFrom<RawTile> for Tile {
    type Error = GeometryError;

    fn try_from(raw: RawTile) -> Result<Self, Self::Error> {
        Tile::checked_new(raw.q, raw.r)
    }
}

/// Deduplicate and sort, so that input order never matters
fn distinct_sorted<I>(tiles: I) -> Vec<Tile>
where
    I: IntoIterator,
    I::Item: Borrow<Tile>,
{
    let mut tiles: Vec<Tile> = tiles.into_iter().map(|t| *t.borrow()).collect();
    tiles.sort_unstable();
    tiles.dedup();
    tiles
}

/// Edge between two adjacent tiles - where roads are built.
///
/// The tiles are kept sorted, so equality and hashing do not depend on the
/// order they were given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tile>", into = "Vec<Tile>")]
pub struct Edge {
    tiles: [Tile; 2],
}

impl Edge {
    /// Create an edge from exactly two distinct, adjacent tiles
    pub fn new<I>(tiles: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator,
        I::Item: Borrow<Tile>,
    {
        let tiles = distinct_sorted(tiles);
        if tiles.len() != 2 || Tile::are_all_adjacent(&tiles) != Ok(true) {
            return Err(GeometryError::InvalidEdge);
        }
        Ok(Self {
            tiles: [tiles[0], tiles[1]],
        })
    }

    /// Create the edge shared by `a` and `b`
    pub fn between(a: Tile, b: Tile) -> Result<Self, GeometryError> {
        Self::new([a, b])
    }

    /// Build from tiles already known to be adjacent
    fn pair(a: Tile, b: Tile) -> Self {
        let mut tiles = [a, b];
        tiles.sort_unstable();
        Self { tiles }
    }

    /// The two tiles sharing this edge, sorted
    pub fn tiles(&self) -> [Tile; 2] {
        self.tiles
    }

    /// Whether `tile` is one of the two tiles sharing this edge
    pub fn contains(&self, tile: Tile) -> bool {
        self.tiles.contains(&tile)
    }

    /// The two tiles sharing this edge
    pub fn adjacent_tiles(&self) -> HashSet<Tile> {
        self.tiles.into_iter().collect()
    }

    /// The two tiles that close a corner with this edge, one at each end
    fn common_neighbors(&self) -> HashSet<Tile> {
        Tile::get_all_adjacent(self.tiles).unwrap_or_default()
    }

    /// Edges that share an endpoint with this one (4 in total)
    pub fn adjacent_edges(&self) -> HashSet<Edge> {
        let common = self.common_neighbors();
        common
            .iter()
            .flat_map(|&n| self.tiles.map(|t| Edge::pair(n, t)))
            .collect()
    }

    /// The two endpoints of this edge
    pub fn adjacent_vertexes(&self) -> HashSet<Vertex> {
        let [a, b] = self.tiles;
        self.common_neighbors()
            .into_iter()
            .map(|n| Vertex::triple(a, b, n))
            .collect()
    }
}

impl TryFrom<Vec<Tile>> for Edge {
    type Error = GeometryError;

    fn try_from(tiles: Vec<Tile>) -> Result<Self, Self::Error> {
        Self::new(tiles)
    }
}

impl TryFrom<[Tile; 2]> for Edge {
    type Error = GeometryError;

    fn try_from(tiles: [Tile; 2]) -> Result<Self, Self::Error> {
        Self::new(tiles)
    }
}

impl From<Edge> for Vec<Tile> {
    fn from(edge: Edge) -> Self {
        edge.tiles.to_vec()
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} | {}]", self.tiles[0], self.tiles[1])
    }
}

/// Corner where three mutually adjacent tiles meet - where settlements are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tile>", into = "Vec<Tile>")]
pub struct Vertex {
    tiles: [Tile; 3],
}

impl Vertex {
    /// Create a vertex from exactly three distinct, pairwise adjacent tiles
    pub fn new<I>(tiles: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator,
        I::Item: Borrow<Tile>,
    {
        let tiles = distinct_sorted(tiles);
        if tiles.len() != 3 || Tile::are_all_adjacent(&tiles) != Ok(true) {
            return Err(GeometryError::InvalidVertex);
        }
        Ok(Self {
            tiles: [tiles[0], tiles[1], tiles[2]],
        })
    }

    /// Build from tiles already known to be pairwise adjacent
    fn triple(a: Tile, b: Tile, c: Tile) -> Self {
        let mut tiles = [a, b, c];
        tiles.sort_unstable();
        Self { tiles }
    }

    /// The three tiles meeting at this vertex, sorted
    pub fn tiles(&self) -> [Tile; 3] {
        self.tiles
    }

    /// Whether `tile` is one of the three tiles meeting here
    pub fn contains(&self, tile: Tile) -> bool {
        self.tiles.contains(&tile)
    }

    /// The three tiles meeting at this vertex
    pub fn adjacent_tiles(&self) -> HashSet<Tile> {
        self.tiles.into_iter().collect()
    }

    /// The three edges that end at this vertex, one per pair of tiles
    pub fn adjacent_edges(&self) -> HashSet<Edge> {
        let [a, b, c] = self.tiles;
        [Edge::pair(a, b), Edge::pair(a, c), Edge::pair(b, c)]
            .into_iter()
            .collect()
    }

    /// The three vertices one edge away.
    ///
    /// Each pair of tiles here has two common neighbors: the third tile of this
    /// vertex, and the tile closing the vertex at the other end of their edge.
    pub fn adjacent_vertexes(&self) -> HashSet<Vertex> {
        self.adjacent_edges()
            .into_iter()
            .flat_map(|edge| edge.adjacent_vertexes())
            .filter(|vertex| vertex != self)
            .collect()
    }
}

impl TryFrom<Vec<Tile>> for Vertex {
    type Error = GeometryError;

    fn try_from(tiles: Vec<Tile>) -> Result<Self, Self::Error> {
        Self::new(tiles)
    }
}

impl TryFrom<[Tile; 3]> for Vertex {
    type Error = GeometryError;

    fn try_from(tiles: [Tile; 3]) -> Result<Self, Self::Error> {
        Self::new(tiles)
    }
}

impl From<Vertex> for Vec<Tile> {
    fn from(vertex: Vertex) -> Self {
        vertex.tiles.to_vec()
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} | {} | {}]",
            self.tiles[0], self.tiles[1], self.tiles[2]
        )
    }
}

/// Anything a tile can be adjacent to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    Tile(Tile),
    Edge(Edge),
    Vertex(Vertex),
}

impl Feature {
    /// The tiles making up this feature
    pub fn tiles(&self) -> Vec<Tile> {
        match self {
            Feature::Tile(tile) => vec![*tile],
            Feature::Edge(edge) => edge.tiles().to_vec(),
            Feature::Vertex(vertex) => vertex.tiles().to_vec(),
        }
    }
}

impl From<Tile> for Feature {
    fn from(tile: Tile) -> Self {
        Feature::Tile(tile)
    }
}

impl From<Edge> for Feature {
    fn from(edge: Edge) -> Self {
        Feature::Edge(edge)
    }
}

impl From<Vertex> for Feature {
    fn from(vertex: Vertex) -> Self {
        Feature::Vertex(vertex)
    }
}
