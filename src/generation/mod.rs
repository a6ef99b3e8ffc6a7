//! # Generation Module
//!
//! Procedural generation of the maze and everything in it.
//!
//! A world is built once per game, in this order:
//!
//! 1. Grow the maze, placing monsters, items and traps as cells are carved
//! 2. Carve the entry above row 1 and the exit below the second-to-last row
//! 3. Raise generic walls around every floor cell
//! 4. Place doors in straight corridor segments
//! 5. Specialise generic walls into box-drawing shapes
//!
//! All randomness comes from a seeded [`StdRng`], so a seed fully determines
//! the world.

pub mod maze;
pub mod population;
pub mod walls;

pub use maze::*;
pub use population::*;
pub use walls::*;

use crate::config;
use crate::{CrawlError, CrawlResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
///
/// # Examples
///
/// ```
/// use mazecrawl::GenerationConfig;
///
/// let config = GenerationConfig::new(7);
/// assert_eq!((config.height, config.width), (15, 15));
/// assert!(config.validate().is_ok());
///
/// let bad = GenerationConfig { width: 14, ..GenerationConfig::new(7) };
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Map height in tiles; odd and at least 3
    pub height: usize,
    /// Map width in tiles; odd and at least 3
    pub width: usize,
    /// Percent chance an eligible corridor cell gets a door
    pub door_chance: u32,
    /// One in this many growth steps reshuffles the carving directions
    pub reshuffle_odds: u32,
    /// Growth-point picks allowed before generation gives up
    pub max_attempts: u32,
}

impl GenerationConfig {
    /// Creates the standard configuration for a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            height: config::MAP_HEIGHT,
            width: config::MAP_WIDTH,
            door_chance: config::DOOR_CHANCE,
            reshuffle_odds: config::RESHUFFLE_ODDS,
            max_attempts: 100_000,
        }
    }

    /// Creates a configuration for testing with a smaller maze.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            height: 9,
            width: 9,
            ..Self::new(seed)
        }
    }

    /// Same configuration with a different map size.
    pub fn with_size(mut self, height: usize, width: usize) -> Self {
        self.height = height;
        self.width = width;
        self
    }

    /// Rejects sizes the maze cannot be grown on.
    ///
    /// The carving lattice sits on odd coordinates, so both dimensions must
    /// be odd for the border to stay solid and at least 3 for any lattice
    /// point to exist.
    pub fn validate(&self) -> CrawlResult<()> {
        for (name, value) in [("height", self.height), ("width", self.width)] {
            if value < 3 {
                return Err(CrawlError::InvalidConfig(format!(
                    "Map {} {} is smaller than 3",
                    name, value
                )));
            }
            if value % 2 == 0 {
                return Err(CrawlError::InvalidConfig(format!(
                    "Map {} {} must be odd",
                    name, value
                )));
            }
        }
        if self.door_chance > 100 {
            return Err(CrawlError::InvalidConfig(format!(
                "Door chance {}% is over 100%",
                self.door_chance
            )));
        }
        if self.reshuffle_odds == 0 {
            return Err(CrawlError::InvalidConfig(
                "Reshuffle odds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> CrawlResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> CrawlResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use crate::game::{MonsterKind, Terrain, World};
    use crate::generation::GenerationConfig;
    use crate::utils::unreachable_from;
    use crate::{CrawlError, CrawlResult};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Validates that a world is playable.
    ///
    /// Checks that the entry and exit are floor, the dragon waits on the
    /// exit, and every passable cell can be reached from the entry.
    pub fn validate_level(world: &World) -> CrawlResult<()> {
        let start = world.start_position();
        let end = world.end_position();

        if world.terrain_at(start) != Terrain::Floor {
            return Err(CrawlError::GenerationFailed(
                "Entry cell is not floor".to_string(),
            ));
        }
        if world.terrain_at(end) != Terrain::Floor {
            return Err(CrawlError::GenerationFailed(
                "Exit cell is not floor".to_string(),
            ));
        }
        if world.entity_at(end).and_then(|entity| entity.monster_kind()) != Some(MonsterKind::Dragon) {
            return Err(CrawlError::GenerationFailed(
                "The dragon is missing from the exit".to_string(),
            ));
        }
        if world.entity_at(start).is_some() {
            return Err(CrawlError::GenerationFailed(
                "Entry cell is occupied".to_string(),
            ));
        }

        let unreachable = unreachable_from(world, start);
        if let Some(first) = unreachable.first() {
            return Err(CrawlError::GenerationFailed(format!(
                "{} passable cells unreachable from the entry, first at {:?}",
                unreachable.len(),
                first
            )));
        }

        Ok(())
    }
}

pub use utils::{create_rng, validate_level};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.door_chance, 30);
        assert_eq!(config.reshuffle_odds, 5);
        assert!(config.validate().is_ok());
        assert!(GenerationConfig::for_testing(1).validate().is_ok());
    }

    #[test]
    fn test_malformed_sizes_are_rejected() {
        let config = GenerationConfig::new(1);
        assert!(config.clone().with_size(3, 3).validate().is_ok());
        assert!(matches!(
            config.clone().with_size(1, 15).validate(),
            Err(CrawlError::InvalidConfig(_))
        ));
        assert!(config.clone().with_size(15, 16).validate().is_err());
        assert!(config.clone().with_size(0, 0).validate().is_err());
        assert!(GenerationConfig {
            door_chance: 101,
            ..config.clone()
        }
        .validate()
        .is_err());
        assert!(GenerationConfig {
            reshuffle_odds: 0,
            ..config
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_utils_rng_creation_is_deterministic() {
        use rand::Rng;
        let config = GenerationConfig::new(12345);
        let a: u64 = create_rng(&config).gen();
        let b: u64 = create_rng(&config).gen();
        assert_eq!(a, b);
    }

    #[test]
    fn test_config_serializes() {
        let config = GenerationConfig::for_testing(3);
        let json = serde_json::to_string(&config).unwrap();
        let back: GenerationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
