//! # Walls and Doors
//!
//! Post-processing passes run after the maze has been carved:
//!
//! - [`add_walls`] raises a generic wall on every empty cell touching floor
//! - [`add_doors`] puts doors in straight corridor segments
//! - [`specialize_walls`] turns each generic wall into a box-drawing shape
//!   chosen from its neighbours
//!
//! The shape of a wall is decided by an 8-bit edge mask over its Moore
//! neighbourhood. Bits run from the top-left neighbour (bit 7) to the
//! bottom-right neighbour (bit 0) in reading order, skipping the centre:
//!
//! ```text
//!  7 6 5
//!  4 . 3
//!  2 1 0
//! ```
//!
//! A bit is set when that neighbour is a wall, a closed door tile, or holds a
//! door entity. Off-map neighbours keep their bit position but never set it.

use crate::game::{Entity, Position, Terrain, World};
use crate::generation::GenerationConfig;
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

/// Neighbour above.
pub const NORTH_BIT: u8 = 1 << 6;
/// Neighbour to the left.
pub const WEST_BIT: u8 = 1 << 4;
/// Neighbour to the right.
pub const EAST_BIT: u8 = 1 << 3;
/// Neighbour below.
pub const SOUTH_BIT: u8 = 1 << 1;

/// Wall shape table in ascending mask order.
///
/// Every pattern whose bits are all present in a wall's edge mask matches,
/// and each match overwrites the previous one, so the last matching entry
/// decides the shape.
pub const WALL_PATTERNS: [(u8, Terrain); 16] = [
    (0b0000_0000, Terrain::CrossWall),
    (0b0000_0010, Terrain::VerticalWall),
    (0b0000_1000, Terrain::HorizontalWall),
    (0b0000_1010, Terrain::UpperLeftWall),
    (0b0001_0000, Terrain::HorizontalWall),
    (0b0001_0010, Terrain::UpperRightWall),
    (0b0001_1000, Terrain::HorizontalWall),
    (0b0001_1010, Terrain::TopTeeWall),
    (0b0100_0000, Terrain::VerticalWall),
    (0b0100_0010, Terrain::VerticalWall),
    (0b0100_1000, Terrain::LowerLeftWall),
    (0b0100_1010, Terrain::LeftTeeWall),
    (0b0101_0000, Terrain::LowerRightWall),
    (0b0101_0010, Terrain::RightTeeWall),
    (0b0101_1000, Terrain::BottomTeeWall),
    (0b0101_1010, Terrain::CrossWall),
];

/// Turns every empty cell with floor among its 8 neighbours into a generic
/// wall. Returns the number of walls raised.
pub fn add_walls(world: &mut World) -> usize {
    let targets: Vec<Position> = world
        .positions()
        .filter(|&pos| world.terrain_at(pos) == Terrain::Empty)
        .filter(|&pos| {
            pos.neighbours()
                .into_iter()
                .any(|next| world.terrain_at(next) == Terrain::Floor)
        })
        .collect();

    for &pos in &targets {
        if let Some(tile) = world.get_tile_mut(pos) {
            tile.set_terrain(Terrain::CrossWall);
        }
    }
    debug!("Raised {} walls", targets.len());
    targets.len()
}

/// Door orientation a floor cell qualifies for, if any.
///
/// Walls directly above and below weigh 1 each, walls directly left and
/// right 3 each. Only a weight of exactly 2 (a vertical door across a
/// horizontal passage) or exactly 6 (a horizontal door across a vertical
/// passage) takes a door. Returns `Some(horizontal)`.
pub fn door_orientation(world: &World, pos: Position) -> Option<bool> {
    let is_wall = |dx: i32, dy: i32| {
        world.terrain_at(Position::new(pos.x + dx, pos.y + dy)) == Terrain::CrossWall
    };

    let mut adjacent = 0;
    if is_wall(0, -1) {
        adjacent += 1;
    }
    if is_wall(0, 1) {
        adjacent += 1;
    }
    if is_wall(-1, 0) {
        adjacent += 3;
    }
    if is_wall(1, 0) {
        adjacent += 3;
    }

    match adjacent {
        2 => Some(false),
        6 => Some(true),
        _ => None,
    }
}

/// Places doors on interior floor cells. Must run after [`add_walls`] and
/// before [`specialize_walls`].
///
/// A door replaces whatever entity was drawn for its cell. A door is skipped
/// when another door already sits next to it across the passage it blocks.
pub fn add_doors(world: &mut World, config: &GenerationConfig, rng: &mut StdRng) -> usize {
    let has_door = |world: &World, x: i32, y: i32| {
        world
            .entity_at(Position::new(x, y))
            .map(Entity::is_door)
            .unwrap_or(false)
    };

    let mut placed = 0;
    for row in 1..world.height().saturating_sub(1) {
        for col in 1..world.width().saturating_sub(1) {
            let pos = Position::from_row_col(row, col);
            if world.terrain_at(pos) != Terrain::Floor {
                continue;
            }
            if rng.gen_range(0..100) >= config.door_chance {
                continue;
            }
            let Some(horizontal) = door_orientation(world, pos) else {
                continue;
            };

            let crowded = if horizontal {
                has_door(world, pos.x, pos.y - 1) || has_door(world, pos.x, pos.y + 1)
            } else {
                has_door(world, pos.x - 1, pos.y) || has_door(world, pos.x + 1, pos.y)
            };
            if crowded {
                continue;
            }

            world.insert_entity(pos, Entity::door(horizontal));
            placed += 1;
        }
    }
    debug!("Placed {} doors", placed);
    placed
}

/// Computes the edge mask of the cell at `pos`.
pub fn edge_mask(world: &World, pos: Position) -> u8 {
    let mut mask = 0u8;
    let mut bit = 8u8;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            bit -= 1;

            let next = Position::new(pos.x + dx, pos.y + dy);
            if !world.is_valid_position(next) {
                continue;
            }
            let door = world.entity_at(next).map(Entity::is_door).unwrap_or(false);
            if world.terrain_at(next).is_block() || door {
                mask |= 1 << bit;
            }
        }
    }
    mask
}

/// Wall shape for an edge mask.
///
/// # Examples
///
/// ```
/// use mazecrawl::{classify_wall, Terrain, EAST_BIT, SOUTH_BIT};
///
/// assert_eq!(classify_wall(EAST_BIT | SOUTH_BIT), Terrain::UpperLeftWall);
/// // Diagonal neighbours never change the shape
/// assert_eq!(classify_wall(0b1010_0101), Terrain::CrossWall);
/// ```
pub fn classify_wall(mask: u8) -> Terrain {
    let mut shape = Terrain::CrossWall;
    for &(pattern, terrain) in WALL_PATTERNS.iter() {
        if mask & pattern == pattern {
            shape = terrain;
        }
    }
    shape
}

/// Replaces every generic wall with its specific shape.
pub fn specialize_walls(world: &mut World) {
    let walls: Vec<Position> = world
        .positions()
        .filter(|&pos| world.terrain_at(pos) == Terrain::CrossWall)
        .collect();

    for pos in walls {
        let shape = classify_wall(edge_mask(world, pos));
        if let Some(tile) = world.get_tile_mut(pos) {
            tile.set_terrain(shape);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_pattern_table_is_sorted() {
        assert!(WALL_PATTERNS.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn test_classification_uses_cardinal_neighbours_only() {
        const DIAGONALS: u8 = 0b1010_0101;
        let cases = [
            (0b0000_0000, Terrain::CrossWall),
            (0b0100_0000, Terrain::VerticalWall),
            (0b0000_0010, Terrain::VerticalWall),
            (0b0001_0000, Terrain::HorizontalWall),
            (0b0000_1000, Terrain::HorizontalWall),
            (0b0001_1000, Terrain::HorizontalWall),
            (0b0100_0010, Terrain::VerticalWall),
            (0b0000_1010, Terrain::UpperLeftWall),
            (0b0100_1010, Terrain::LeftTeeWall),
            (0b0101_0010, Terrain::RightTeeWall),
            (0b0101_1000, Terrain::BottomTeeWall),
            (0b0101_1010, Terrain::CrossWall),
        ];
        for (mask, shape) in cases {
            assert_eq!(classify_wall(mask), shape, "mask {:08b}", mask);
            assert_eq!(classify_wall(mask | DIAGONALS), shape, "mask {:08b}", mask | DIAGONALS);
        }
    }

    #[test]
    fn test_named_shapes() {
        assert_eq!(classify_wall(0), Terrain::CrossWall);
        assert_eq!(classify_wall(NORTH_BIT | SOUTH_BIT), Terrain::VerticalWall);
        assert_eq!(classify_wall(WEST_BIT | EAST_BIT), Terrain::HorizontalWall);
        assert_eq!(classify_wall(WEST_BIT | SOUTH_BIT), Terrain::UpperRightWall);
        assert_eq!(classify_wall(NORTH_BIT | EAST_BIT), Terrain::LowerLeftWall);
        assert_eq!(classify_wall(NORTH_BIT | WEST_BIT), Terrain::LowerRightWall);
        assert_eq!(classify_wall(WEST_BIT | EAST_BIT | SOUTH_BIT), Terrain::TopTeeWall);
        assert_eq!(classify_wall(NORTH_BIT | WEST_BIT | EAST_BIT), Terrain::BottomTeeWall);
        assert_eq!(classify_wall(NORTH_BIT | EAST_BIT | SOUTH_BIT), Terrain::LeftTeeWall);
        assert_eq!(classify_wall(NORTH_BIT | WEST_BIT | SOUTH_BIT), Terrain::RightTeeWall);
        assert_eq!(
            classify_wall(NORTH_BIT | WEST_BIT | EAST_BIT | SOUTH_BIT),
            Terrain::CrossWall
        );
    }

    #[test]
    fn test_edge_mask_bit_order() {
        let world = World::from_layout(&[
            "#  ", //
            " . ", //
            "  #",
        ])
        .unwrap();
        assert_eq!(edge_mask(&world, Position::new(1, 1)), 0b1000_0001);
    }

    #[test]
    fn test_edge_mask_off_map_neighbours_are_clear() {
        let world = World::from_layout(&[
            "##", //
            "##",
        ])
        .unwrap();
        // Top-left corner sees E, S and SE only
        assert_eq!(edge_mask(&world, Position::new(0, 0)), EAST_BIT | SOUTH_BIT | 1);
        assert_eq!(edge_mask(&world, Position::new(1, 1)), 0b1101_0000);
    }

    #[test]
    fn test_door_entity_counts_as_block() {
        let mut world = World::from_layout(&[
            "   ", //
            "#..", //
            "   ",
        ])
        .unwrap();
        world.insert_entity(Position::new(1, 1), Entity::door(false));
        assert_eq!(edge_mask(&world, Position::new(0, 1)), EAST_BIT);
    }

    #[test]
    fn test_walls_surround_floor() {
        let mut world = World::from_layout(&[
            "     ", //
            " ... ", //
            "     ", //
            "     ",
        ])
        .unwrap();
        let raised = add_walls(&mut world);
        assert_eq!(raised, 12);
        assert_eq!(world.terrain_at(Position::new(0, 0)), Terrain::CrossWall);
        assert_eq!(world.terrain_at(Position::new(2, 3)), Terrain::Empty);
        assert!(!world.is_passable(Position::new(4, 2)));

        specialize_walls(&mut world);
        assert_eq!(world.terrain_at(Position::new(0, 0)), Terrain::UpperLeftWall);
        assert_eq!(world.terrain_at(Position::new(2, 0)), Terrain::HorizontalWall);
        assert_eq!(world.terrain_at(Position::new(4, 2)), Terrain::LowerRightWall);
        assert_eq!(world.terrain_at(Position::new(0, 1)), Terrain::VerticalWall);
    }

    #[test]
    fn test_door_orientation_weights() {
        let mut world = World::from_layout(&[
            "     ", //
            " ... ", //
            "     ",
        ])
        .unwrap();
        add_walls(&mut world);
        // Walls above and below only
        assert_eq!(door_orientation(&world, Position::new(2, 1)), Some(false));
        // Wall to the left as well
        assert_eq!(door_orientation(&world, Position::new(1, 1)), None);
    }

    #[test]
    fn test_doors_never_stack_across_a_passage() {
        let mut world = World::from_layout(&[
            "       ", //
            " ..... ", //
            "       ",
        ])
        .unwrap();
        add_walls(&mut world);
        let config = GenerationConfig {
            door_chance: 100,
            ..GenerationConfig::for_testing(0)
        };
        let mut rng = StdRng::seed_from_u64(0);
        let placed = add_doors(&mut world, &config, &mut rng);

        // Cells 2 and 4 qualify; 3 is skipped because 2 already has a door
        assert_eq!(placed, 2);
        assert!(world.entity_at(Position::new(2, 1)).map(Entity::is_door).unwrap_or(false));
        assert!(world.entity_at(Position::new(3, 1)).is_none());
        assert_eq!(
            world.entity_at(Position::new(4, 1)).map(Entity::kind),
            Some(crate::game::EntityKind::Door {
                open: false,
                horizontal: false
            })
        );
    }
}
