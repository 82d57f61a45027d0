//! Hexboard debug tool: renders a grid and answers adjacency queries.

use anyhow::{bail, Context};
use hexboard_core::{Direction, Grid, Tile};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod report;

use config::Config;
use report::{AdjacencyReport, MoveReport};

const USAGE: &str = "usage: hexboard [render | adjacent <q,r> | move <q,r> <direction>]";

fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("Invalid configuration")?;
    info!(radius = config.radius, marks = config.marks.len(), "Building grid");

    let mut grid = Grid::new(config.radius).context("Cannot build grid")?;
    for tile in &config.marks {
        if !grid.is_inside(*tile) {
            warn!(%tile, "Marked tile is outside the grid and will not be drawn");
        }
        grid.mark(*tile);
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        [] | ["render"] => println!("{}", grid.to_display_string()),
        ["adjacent", tile] => {
            let tile = parse_tile(tile)?;
            let report = AdjacencyReport::new(&grid, tile);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        ["move", tile, direction] => {
            let tile = parse_tile(tile)?;
            let direction: Direction = direction
                .parse()
                .with_context(|| format!("Invalid direction {direction:?}"))?;
            let report = MoveReport::new(&grid, tile, direction);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => bail!(USAGE),
    }

    Ok(())
}

fn parse_tile(text: &str) -> anyhow::Result<Tile> {
    text.parse()
        .with_context(|| format!("Expected a tile as q,r but got {text:?}"))
}
