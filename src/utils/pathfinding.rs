//! # Reachability
//!
//! Flood fill over passable tiles, used to validate generated mazes.

use crate::game::{Position, World};
use pathfinding::prelude::bfs_reach;
use std::collections::HashSet;

/// Returns every position reachable from `start` through passable tiles.
///
/// Movement is 8-directional, matching what the player can do. The start
/// position is always included, even if it is not itself passable.
pub fn reachable_from(world: &World, start: Position) -> HashSet<Position> {
    bfs_reach(start, |&pos| {
        pos.neighbours()
            .into_iter()
            .filter(|&next| world.is_passable(next))
            .collect::<Vec<_>>()
    })
    .collect()
}

/// Returns every passable position on the map that cannot be reached from
/// `start`.
pub fn unreachable_from(world: &World, start: Position) -> Vec<Position> {
    let reached = reachable_from(world, start);
    world
        .positions()
        .filter(|&pos| world.is_passable(pos) && !reached.contains(&pos))
        .collect()
}
