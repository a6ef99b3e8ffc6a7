//! # Maze Generation
//!
//! Randomised growth of a perfect maze on the odd-coordinate lattice.
//!
//! Growth starts from one forced floor cell. Each round picks a random
//! lattice cell; if it is already floor, the cursor walks from it, carving
//! two cells at a time towards unvisited lattice cells until it runs into a
//! dead end. There is no explicit backtracking stack: the next round simply
//! picks a new growth point. Growth stops once every lattice cell has been
//! reached, so the carved floor always forms one connected tree.
//!
//! Every carved cell gets a population draw as it is carved.

use crate::game::{Direction, Position, Terrain, World};
use crate::generation::population::{dragon, roll_occupant};
use crate::generation::walls::{add_doors, add_walls, specialize_walls};
use crate::generation::{utils, GenerationConfig, Generator};
use crate::{CrawlError, CrawlResult};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Generator for complete, populated maze worlds.
///
/// # Examples
///
/// ```
/// use mazecrawl::{create_rng, GenerationConfig, Generator, MazeGenerator};
///
/// let config = GenerationConfig::new(12345);
/// let mut rng = create_rng(&config);
/// let world = MazeGenerator::new().generate(&config, &mut rng).unwrap();
/// assert_eq!(world.player_position(), world.start_position());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MazeGenerator;

impl MazeGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Number of growth steps after which every lattice cell is floor.
    fn growth_target(config: &GenerationConfig) -> usize {
        (config.height - 1) * (config.width - 1) / 4
    }

    fn random_lattice_cell(config: &GenerationConfig, rng: &mut StdRng) -> Position {
        let row = 1 + rng.gen_range(0..(config.height - 1) / 2) * 2;
        let col = 1 + rng.gen_range(0..(config.width - 1) / 2) * 2;
        Position::from_row_col(row, col)
    }

    fn is_interior(world: &World, pos: Position) -> bool {
        pos.y >= 1
            && pos.x >= 1
            && (pos.y as usize) < world.height() - 1
            && (pos.x as usize) < world.width() - 1
    }

    /// Carves a floor cell and draws its occupant.
    ///
    /// The entry cell stays empty and the exit cell always gets the dragon.
    fn make_floor(&self, world: &mut World, pos: Position, rng: &mut StdRng) {
        if let Some(tile) = world.get_tile_mut(pos) {
            tile.set_terrain(Terrain::Floor);
        }

        if pos == world.start_position() {
            return;
        }
        let occupant = if pos == world.end_position() {
            Some(dragon())
        } else {
            roll_occupant(pos.y as usize, world.height(), rng)
        };
        if let Some(entity) = occupant {
            world.insert_entity(pos, entity);
        }
    }

    /// Grows the maze until every lattice cell has been carved.
    fn grow_maze(
        &self,
        world: &mut World,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> CrawlResult<()> {
        let target = Self::growth_target(config);
        let mut directions = Direction::CARDINAL;
        let mut done = 0usize;
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            if attempts > config.max_attempts {
                return Err(CrawlError::GenerationFailed(format!(
                    "Maze growth stalled after {} attempts ({} of {} steps)",
                    config.max_attempts, done, target
                )));
            }

            let mut cursor = Self::random_lattice_cell(config, rng);
            if done == 0 {
                self.make_floor(world, cursor, rng);
            }

            if world.terrain_at(cursor) == Terrain::Floor {
                directions.shuffle(rng);
                loop {
                    if rng.gen_range(0..config.reshuffle_odds) == 0 {
                        directions.shuffle(rng);
                    }

                    let next = directions.iter().copied().find_map(|direction| {
                        let destination = cursor.leap(direction, 2);
                        let open = Self::is_interior(world, destination)
                            && world.terrain_at(destination) != Terrain::Floor;
                        open.then_some((direction, destination))
                    });

                    let Some((direction, destination)) = next else {
                        break;
                    };
                    self.make_floor(world, destination, rng);
                    self.make_floor(world, cursor.step(direction), rng);
                    cursor = destination;
                    done += 1;
                }
            }

            if done + 1 >= target {
                break;
            }
        }

        debug!(
            "Maze grown in {} steps from {} growth points",
            done, attempts
        );
        Ok(())
    }

    /// Carves the entry above row 1 and the exit below the second-to-last
    /// row, and puts the player on the entry.
    fn add_exits(&self, world: &mut World, rng: &mut StdRng) -> CrawlResult<()> {
        let floor_columns = |world: &World, row: usize| -> Vec<usize> {
            (1..world.width() - 1)
                .filter(|&col| world.terrain_at(Position::from_row_col(row, col)) == Terrain::Floor)
                .collect()
        };

        let start_col = *floor_columns(world, 1).choose(rng).ok_or_else(|| {
            CrawlError::GenerationFailed("No floor on the first maze row".to_string())
        })?;
        world.set_start_col(start_col);
        let start = world.start_position();
        self.make_floor(world, start, rng);
        world.set_player_position(start);

        let last_row = world.height() - 2;
        let end_col = *floor_columns(world, last_row).choose(rng).ok_or_else(|| {
            CrawlError::GenerationFailed("No floor on the last maze row".to_string())
        })?;
        world.set_end_col(end_col);
        let end = world.end_position();
        self.make_floor(world, end, rng);

        debug!("Entry at column {}, exit at column {}", start_col, end_col);
        Ok(())
    }
}

impl Generator<World> for MazeGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> CrawlResult<World> {
        config.validate()?;

        let mut world = World::new(config.height, config.width);
        self.grow_maze(&mut world, config, rng)?;
        self.add_exits(&mut world, rng)?;
        add_walls(&mut world);
        add_doors(&mut world, config, rng);
        specialize_walls(&mut world);

        self.validate(&world, config)?;
        Ok(world)
    }

    fn validate(&self, world: &World, config: &GenerationConfig) -> CrawlResult<()> {
        if world.height() != config.height || world.width() != config.width {
            return Err(CrawlError::GenerationFailed(format!(
                "Generated {}x{} world for a {}x{} configuration",
                world.height(),
                world.width(),
                config.height,
                config.width
            )));
        }
        utils::validate_level(world)
    }

    fn generator_type(&self) -> &'static str {
        "maze"
    }
}
