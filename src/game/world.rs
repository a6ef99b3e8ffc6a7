//! # World
//!
//! The tile grid, the entity placement map and the player's position.
//!
//! Tiles are created empty and impassable; generation sets their terrain and
//! passability once. After that only visibility changes from turn to turn.
//! Doors never change the tile underneath them; a door is an entity and its
//! open flag decides whether the cell can be entered.

use crate::game::{Entity, Position};
use crate::{CrawlError, CrawlResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Surface kind of a single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Empty,
    Floor,
    Corridor,
    /// Generic wall, also the cross-shaped junction
    CrossWall,
    HorizontalWall,
    VerticalWall,
    UpperLeftWall,
    UpperRightWall,
    LowerRightWall,
    LowerLeftWall,
    TopTeeWall,
    RightTeeWall,
    BottomTeeWall,
    LeftTeeWall,
    HorizontalDoorOpen,
    HorizontalDoorClosed,
    VerticalDoorOpen,
    VerticalDoorClosed,
    Trap,
    Player,
}

impl Terrain {
    /// Whether this terrain is any wall shape.
    pub fn is_wall(self) -> bool {
        matches!(
            self,
            Terrain::CrossWall
                | Terrain::HorizontalWall
                | Terrain::VerticalWall
                | Terrain::UpperLeftWall
                | Terrain::UpperRightWall
                | Terrain::LowerRightWall
                | Terrain::LowerLeftWall
                | Terrain::TopTeeWall
                | Terrain::RightTeeWall
                | Terrain::BottomTeeWall
                | Terrain::LeftTeeWall
        )
    }

    /// Walls and closed doors: the terrain wall shapes connect to.
    pub fn is_block(self) -> bool {
        self.is_wall()
            || matches!(
                self,
                Terrain::HorizontalDoorClosed | Terrain::VerticalDoorClosed
            )
    }

    /// Whether a tile of this terrain can be walked on.
    pub fn is_passable(self) -> bool {
        matches!(
            self,
            Terrain::Floor
                | Terrain::Corridor
                | Terrain::HorizontalDoorOpen
                | Terrain::VerticalDoorOpen
        )
    }
}

/// A single cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub terrain: Terrain,
    pub passable: bool,
    /// Ever observed by the player
    pub seen: bool,
    /// In the player's field of view this turn
    pub visible: bool,
}

impl Tile {
    /// An empty, impassable, unseen tile.
    pub fn new() -> Self {
        Self::with_terrain(Terrain::Empty)
    }

    /// A tile of the given terrain, with passability derived from it.
    pub fn with_terrain(terrain: Terrain) -> Self {
        Self {
            terrain,
            passable: terrain.is_passable(),
            seen: false,
            visible: false,
        }
    }

    /// Changes the terrain and keeps passability in step with it.
    pub fn set_terrain(&mut self, terrain: Terrain) {
        self.terrain = terrain;
        self.passable = terrain.is_passable();
    }

    pub fn is_block(&self) -> bool {
        self.terrain.is_block()
    }

    /// Marks the tile visible this turn, and therefore seen.
    pub fn reveal(&mut self) {
        self.visible = true;
        self.seen = true;
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new()
    }
}

/// The maze: grid, placed entities and the player's position.
#[derive(Debug, Clone)]
pub struct World {
    height: usize,
    width: usize,
    tiles: Vec<Vec<Tile>>,
    entities: HashMap<Position, Entity>,
    player: Position,
    start_col: usize,
    end_col: usize,
}

impl World {
    /// Creates a world of empty tiles with the player at the origin.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazecrawl::{Position, Terrain, World};
    ///
    /// let world = World::new(5, 7);
    /// assert_eq!(world.height(), 5);
    /// assert_eq!(world.width(), 7);
    /// assert_eq!(world.get_tile(Position::new(3, 3)).unwrap().terrain, Terrain::Empty);
    /// assert!(world.get_tile(Position::new(7, 0)).is_none());
    /// ```
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            tiles: vec![vec![Tile::new(); width]; height],
            entities: HashMap::new(),
            player: Position::new(0, 0),
            start_col: 0,
            end_col: 0,
        }
    }

    /// Builds a world from a textual layout, one string per row.
    ///
    /// `.` is floor, `#` is a generic wall and a space is empty. The player
    /// starts at the first floor cell of the top row, if there is one.
    pub fn from_layout(rows: &[&str]) -> CrawlResult<Self> {
        let height = rows.len();
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(CrawlError::InvalidConfig("Empty layout".to_string()));
        }

        let mut world = World::new(height, width);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(CrawlError::InvalidConfig(format!(
                    "Layout row {} has the wrong width",
                    y
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                let terrain = match ch {
                    '.' => Terrain::Floor,
                    '#' => Terrain::CrossWall,
                    ' ' => Terrain::Empty,
                    other => {
                        return Err(CrawlError::InvalidConfig(format!(
                            "Unknown layout character '{}'",
                            other
                        )))
                    }
                };
                world.tiles[y][x].set_terrain(terrain);
            }
        }

        if let Some(col) = (0..width).find(|&x| world.tiles[0][x].terrain == Terrain::Floor) {
            world.start_col = col;
            world.player = Position::from_row_col(0, col);
        }

        Ok(world)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Checks if a position lies on the grid.
    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn get_tile(&self, pos: Position) -> Option<&Tile> {
        if !self.is_valid_position(pos) {
            return None;
        }
        self.tiles
            .get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
    }

    pub fn get_tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        if !self.is_valid_position(pos) {
            return None;
        }
        self.tiles
            .get_mut(pos.y as usize)
            .and_then(|row| row.get_mut(pos.x as usize))
    }

    /// Terrain at a position; off-map reads as empty.
    pub fn terrain_at(&self, pos: Position) -> Terrain {
        self.get_tile(pos)
            .map(|tile| tile.terrain)
            .unwrap_or(Terrain::Empty)
    }

    /// On the map and marked passable.
    pub fn is_passable(&self, pos: Position) -> bool {
        self.get_tile(pos).map(|tile| tile.passable).unwrap_or(false)
    }

    /// All grid positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height)
            .flat_map(move |row| (0..self.width).map(move |col| Position::from_row_col(row, col)))
    }

    pub fn entity_at(&self, pos: Position) -> Option<&Entity> {
        self.entities.get(&pos)
    }

    pub fn entity_at_mut(&mut self, pos: Position) -> Option<&mut Entity> {
        self.entities.get_mut(&pos)
    }

    /// Places an entity, returning whatever previously occupied the cell.
    pub fn insert_entity(&mut self, pos: Position, entity: Entity) -> Option<Entity> {
        self.entities.insert(pos, entity)
    }

    /// Detaches and returns the entity at a position.
    pub fn remove_entity(&mut self, pos: Position) -> Option<Entity> {
        self.entities.remove(&pos)
    }

    /// Every placed entity with its position, in no particular order.
    pub fn entities(&self) -> impl Iterator<Item = (Position, &Entity)> + '_ {
        self.entities.iter().map(|(pos, entity)| (*pos, entity))
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn player_position(&self) -> Position {
        self.player
    }

    pub fn set_player_position(&mut self, pos: Position) {
        self.player = pos;
    }

    pub fn start_col(&self) -> usize {
        self.start_col
    }

    pub fn set_start_col(&mut self, col: usize) {
        self.start_col = col;
    }

    pub fn set_end_col(&mut self, col: usize) {
        self.end_col = col;
    }

    /// Entry cell on the top row.
    pub fn start_position(&self) -> Position {
        Position::from_row_col(0, self.start_col)
    }

    /// Exit cell on the bottom row, home of the dragon.
    pub fn end_position(&self) -> Position {
        Position::from_row_col(self.height.saturating_sub(1), self.end_col)
    }

    /// Recomputes the field of view: the 3x3 block around the player.
    pub fn update_visibility(&mut self) {
        for row in &mut self.tiles {
            for tile in row {
                tile.visible = false;
            }
        }

        let player = self.player;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if let Some(tile) = self.get_tile_mut(Position::new(player.x + dx, player.y + dy)) {
                    tile.reveal();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_passability_tracks_terrain() {
        let mut tile = Tile::new();
        assert!(!tile.passable);
        tile.set_terrain(Terrain::Floor);
        assert!(tile.passable);
        tile.set_terrain(Terrain::VerticalWall);
        assert!(!tile.passable);
        assert!(tile.is_block());
        tile.set_terrain(Terrain::HorizontalDoorOpen);
        assert!(tile.passable);
        assert!(!tile.is_block());
    }

    #[test]
    fn test_block_covers_walls_and_closed_doors() {
        assert!(Terrain::CrossWall.is_block());
        assert!(Terrain::LeftTeeWall.is_block());
        assert!(Terrain::VerticalDoorClosed.is_block());
        assert!(!Terrain::VerticalDoorOpen.is_block());
        assert!(!Terrain::Floor.is_block());
        assert!(!Terrain::Empty.is_block());
    }

    #[test]
    fn test_layout_parsing() {
        let world = World::from_layout(&[
            "#.#", //
            "#.#", //
            "###",
        ])
        .unwrap();
        assert_eq!(world.start_col(), 1);
        assert_eq!(world.player_position(), Position::new(1, 0));
        assert!(world.is_passable(Position::new(1, 1)));
        assert!(!world.is_passable(Position::new(0, 1)));
        assert!(!world.is_passable(Position::new(-1, 1)));

        assert!(World::from_layout(&["#.", "#"]).is_err());
        assert!(World::from_layout(&["#x"]).is_err());
        assert!(World::from_layout(&[]).is_err());
    }

    #[test]
    fn test_entity_placement_holds_one_per_cell() {
        let mut world = World::new(3, 3);
        let pos = Position::new(1, 1);
        assert!(world.insert_entity(pos, Entity::key()).is_none());
        let replaced = world.insert_entity(pos, Entity::potion());
        assert_eq!(replaced, Some(Entity::key()));
        assert_eq!(world.entity_count(), 1);
        assert_eq!(world.remove_entity(pos), Some(Entity::potion()));
        assert!(world.entity_at(pos).is_none());
    }

    #[test]
    fn test_visibility_reveals_three_by_three() {
        let mut world = World::new(5, 5);
        world.set_player_position(Position::new(2, 2));
        world.update_visibility();
        assert!(world.get_tile(Position::new(1, 1)).unwrap().visible);
        assert!(world.get_tile(Position::new(3, 3)).unwrap().visible);
        assert!(!world.get_tile(Position::new(4, 4)).unwrap().visible);

        world.set_player_position(Position::new(0, 0));
        world.update_visibility();
        let old = world.get_tile(Position::new(3, 3)).unwrap();
        assert!(!old.visible);
        assert!(old.seen);
    }

    #[test]
    fn test_positions_are_row_major() {
        let world = World::new(2, 3);
        let positions: Vec<Position> = world.positions().collect();
        assert_eq!(positions.len(), 6);
        assert_eq!(positions[0], Position::new(0, 0));
        assert_eq!(positions[3], Position::new(0, 1));
    }
}
