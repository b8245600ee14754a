#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use catalog::*;
pub use economy::*;
pub use error::*;
pub use filters::*;
pub use grid::*;
pub use identify::*;
pub use mineral::*;
pub use random::*;
pub use route::*;
pub use schedule::*;
pub use scores::*;
pub use session::*;
pub use tools::*;
pub use trip::*;
pub use types::*;

mod catalog;
mod economy;
mod error;
mod filters;
mod grid;
mod identify;
mod mineral;
mod random;
mod route;
mod schedule;
mod scores;
mod session;
mod tools;
mod trip;
mod types;

pub const DEFAULT_GRID_SIZE: Coord = 8;
pub const DEFAULT_MINERAL_DENSITY: f64 = 0.35;
pub const DEFAULT_ROUNDS: u8 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square dig site.
    pub grid_size: Coord,
    /// Chance that any single cell hides a mineral.
    pub mineral_density: f64,
    pub max_attempts: u8,
    /// Rounds in one Tool Shed session.
    pub rounds: u8,
}

impl GameConfig {
    pub const fn new_unchecked(
        grid_size: Coord,
        mineral_density: f64,
        max_attempts: u8,
        rounds: u8,
    ) -> Self {
        Self {
            grid_size,
            mineral_density,
            max_attempts,
            rounds,
        }
    }

    pub fn new(grid_size: Coord, mineral_density: f64, max_attempts: u8, rounds: u8) -> Self {
        let grid_size = grid_size.clamp(1, 16);
        let mineral_density = if mineral_density.is_nan() {
            DEFAULT_MINERAL_DENSITY
        } else {
            mineral_density.clamp(0.0, 1.0)
        };
        let max_attempts = max_attempts.max(1);
        let rounds = rounds.max(1);
        Self::new_unchecked(grid_size, mineral_density, max_attempts, rounds)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.grid_size, self.grid_size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(
            DEFAULT_GRID_SIZE,
            DEFAULT_MINERAL_DENSITY,
            DEFAULT_MAX_ATTEMPTS,
            DEFAULT_ROUNDS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_the_standard_game() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 8);
        assert_eq!(config.total_cells(), 64);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.rounds, 10);
    }

    #[test]
    fn new_clamps_out_of_range_values() {
        let config = GameConfig::new(0, 1.7, 0, 0);
        assert_eq!(config.grid_size, 1);
        assert_eq!(config.mineral_density, 1.0);
        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.rounds, 1);

        assert_eq!(GameConfig::new(200, f64::NAN, 3, 10).mineral_density, 0.35);
        assert_eq!(GameConfig::new(200, 0.2, 3, 10).grid_size, 16);
    }

    #[test]
    fn partial_config_json_fills_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"rounds": 5}"#).unwrap();
        assert_eq!(config.rounds, 5);
        assert_eq!(config.grid_size, 8);
    }
}
