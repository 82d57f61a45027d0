//! Integration tests for the hexboard geometry.
//!
//! These tests walk the board the way game logic does: from tiles to the roads
//! and settlements around them, trimmed to a bounded grid.

use hexboard_core::*;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;

/// Every edge touching the grid, collected from its tiles
fn board_edges(grid: &Grid) -> HashSet<Edge> {
    grid.tiles().flat_map(|t| t.adjacent_edges()).collect()
}

/// Every vertex touching the grid, collected from its tiles
fn board_vertexes(grid: &Grid) -> HashSet<Vertex> {
    grid.tiles().flat_map(|t| t.adjacent_vertexes()).collect()
}

#[test]
fn test_standard_board_slot_counts() {
    // The standard 19-tile board has 72 road slots and 54 settlement slots
    let grid = Grid::new(2).unwrap();
    assert_eq!(grid.len(), 19);

    let vertexes = board_vertexes(&grid);
    assert_eq!(vertexes.len(), 54);

    let roads = board_edges(&grid);
    assert_eq!(roads.len(), 72);

    // 30 of the road slots run along the coast, between a board tile and the sea
    let coastal = roads.iter().filter(|e| !grid.contains_edge(e)).count();
    assert_eq!(coastal, 30);

    // Slots around a tile outside the board only count where they touch it
    let offshore = Tile::new(3, -1);
    let touching = offshore
        .adjacent_edges()
        .into_iter()
        .filter(|e| grid.touches_edge(e))
        .count();
    assert_eq!(touching, 2);
    assert!(touching < offshore.adjacent_edges().len());
}

#[test]
fn test_interior_edges_and_vertexes() {
    let grid = Grid::new(2).unwrap();

    let interior_edges = board_edges(&grid)
        .into_iter()
        .filter(|e| grid.contains_edge(e))
        .count();
    assert_eq!(interior_edges, 42);

    let interior_vertexes = board_vertexes(&grid)
        .into_iter()
        .filter(|v| grid.contains_vertex(v))
        .count();
    assert_eq!(interior_vertexes, 24);
}

#[test]
fn test_edge_and_vertex_adjacency_agree() {
    // An edge is adjacent to a vertex exactly when the vertex is adjacent to the edge
    let tile = Tile::new(1, -1);
    for edge in tile.adjacent_edges() {
        for vertex in edge.adjacent_vertexes() {
            assert!(vertex.adjacent_edges().contains(&edge));
        }
    }
    for vertex in tile.adjacent_vertexes() {
        for edge in vertex.adjacent_edges() {
            assert!(edge.adjacent_vertexes().contains(&vertex));
        }
        for neighbor in vertex.adjacent_vertexes() {
            assert!(neighbor.adjacent_vertexes().contains(&vertex));
            // Neighboring vertexes share exactly one edge
            let shared: HashSet<Edge> = vertex
                .adjacent_edges()
                .intersection(&neighbor.adjacent_edges())
                .copied()
                .collect();
            assert_eq!(shared.len(), 1);
        }
    }
}

#[test]
fn test_adjacent_edges_share_a_vertex() {
    let edge = Edge::between(Tile::new(0, 0), Tile::new(0, 1)).unwrap();
    let endpoints = edge.adjacent_vertexes();

    for other in edge.adjacent_edges() {
        let shares_endpoint = other
            .adjacent_vertexes()
            .iter()
            .any(|v| endpoints.contains(v));
        assert!(shares_endpoint, "{} should share an endpoint with {}", other, edge);
    }
}

#[test]
fn test_construction_is_order_independent() {
    let mut rng = StdRng::seed_from_u64(7);

    for vertex in Tile::new(-2, 1).adjacent_vertexes() {
        let mut tiles = vertex.tiles().to_vec();
        for _ in 0..6 {
            tiles.shuffle(&mut rng);
            assert_eq!(Vertex::new(&tiles), Ok(vertex));

            let pair = [tiles[0], tiles[1]];
            let reversed = [tiles[1], tiles[0]];
            assert_eq!(Edge::new(pair), Edge::new(reversed));
        }
    }
}

#[test]
fn test_adjacency_results_independent_of_input_order() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut tiles = vec![Tile::new(0, 0), Tile::new(1, 0), Tile::new(1, -1)];
    let expected = Tile::get_all_adjacent(&tiles).unwrap();

    for _ in 0..6 {
        tiles.shuffle(&mut rng);
        assert_eq!(Tile::get_all_adjacent(&tiles).unwrap(), expected);
        assert_eq!(Tile::are_all_adjacent(&tiles), Ok(true));
    }
}

#[test]
fn test_tile_adjacent_to_its_edges_and_vertexes() {
    let tile = Tile::new(3, -1);
    for edge in tile.adjacent_edges() {
        assert!(tile.is_adjacent(edge));
        assert!(tile.is_adjacent(Feature::Edge(edge)));
    }
    for vertex in tile.adjacent_vertexes() {
        assert!(tile.is_adjacent(vertex));
    }
    assert!(!Tile::ORIGIN.is_adjacent(Edge::between(tile, tile.step(Direction::East)).unwrap()));
}

#[test]
fn test_walking_the_ring() {
    // Going around a ring of radius 2 visits 12 distinct tiles and comes back
    let grid = Grid::new(2).unwrap();
    let mut tile = Tile::new(-2, 0);
    let mut visited = vec![tile];

    for direction in Direction::ALL {
        for _ in 0..2 {
            tile = tile.step(direction);
            visited.push(tile);
        }
    }

    assert_eq!(visited.last(), Some(&Tile::new(-2, 0)));
    visited.pop();
    let unique: HashSet<Tile> = visited.iter().copied().collect();
    assert_eq!(unique.len(), 12);
    assert!(visited.iter().all(|t| grid.is_inside(*t)));
    assert!(visited.iter().all(|t| t.distance_to(Tile::ORIGIN) == 2));
}

#[test]
fn test_serde_round_trip() {
    let vertex = Vertex::new([Tile::new(0, 0), Tile::new(1, 0), Tile::new(0, 1)]).unwrap();
    let json = serde_json::to_string(&vertex).unwrap();
    assert_eq!(json, r#"[{"q":0,"r":0},{"q":0,"r":1},{"q":1,"r":0}]"#);
    assert_eq!(serde_json::from_str::<Vertex>(&json).unwrap(), vertex);

    let edge = Edge::between(Tile::new(0, 0), Tile::new(-1, 0)).unwrap();
    let json = serde_json::to_string(&Feature::Edge(edge)).unwrap();
    assert_eq!(serde_json::from_str::<Feature>(&json).unwrap(), Feature::Edge(edge));
}

#[test]
fn test_deserializing_invalid_geometry_fails() {
    let far_apart = r#"[{"q":0,"r":0},{"q":2,"r":0}]"#;
    assert!(serde_json::from_str::<Edge>(far_apart).is_err());

    let in_a_row = r#"[{"q":-1,"r":0},{"q":0,"r":0},{"q":1,"r":0}]"#;
    assert!(serde_json::from_str::<Vertex>(in_a_row).is_err());

    let beyond_range = r#"{"q":2147483647,"r":0}"#;
    assert!(serde_json::from_str::<Tile>(beyond_range).is_err());
}

#[test]
fn test_grid_serializes_radius_and_marks() {
    let mut grid = Grid::new(2).unwrap();
    grid.mark(Tile::new(1, 1));

    let json = serde_json::to_string(&grid).unwrap();
    assert_eq!(json, r#"{"radius":2,"marks":[{"q":1,"r":1}]}"#);

    let restored: Grid = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.len(), 19);
    assert!(restored.is_marked(Tile::new(1, 1)));
    assert_eq!(restored.to_display_string(), grid.to_display_string());

    let huge = r#"{"radius":4294967295}"#;
    assert!(serde_json::from_str::<Grid>(huge).is_err());
}
