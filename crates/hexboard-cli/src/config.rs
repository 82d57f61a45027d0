//! Environment configuration for the debug tool.

use hexboard_core::{GeometryError, Grid, Tile};
use thiserror::Error;

/// Default grid radius: the standard 19-tile board
pub const DEFAULT_RADIUS: u32 = 2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("HEXBOARD_RADIUS must be an integer from 0 to {max}, got {0:?}", max = Grid::MAX_RADIUS)]
    InvalidRadius(String),

    #[error("HEXBOARD_MARKS contains an invalid tile: {0}")]
    InvalidMark(#[from] GeometryError),
}

/// Settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Radius of the grid to build
    pub radius: u32,
    /// Tiles to highlight when rendering
    pub marks: Vec<Tile>,
}

impl Config {
    /// Read `HEXBOARD_RADIUS` and `HEXBOARD_MARKS`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("HEXBOARD_RADIUS").ok().as_deref(),
            std::env::var("HEXBOARD_MARKS").ok().as_deref(),
        )
    }

    fn from_vars(radius: Option<&str>, marks: Option<&str>) -> Result<Self, ConfigError> {
        let radius = match radius {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|radius| *radius <= Grid::MAX_RADIUS)
                .ok_or_else(|| ConfigError::InvalidRadius(value.to_string()))?,
            None => DEFAULT_RADIUS,
        };

        let marks = marks
            .unwrap_or_default()
            .split(';')
            .filter(|entry| !entry.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Tile>, _>>()?;

        Ok(Self { radius, marks })
    }
}
