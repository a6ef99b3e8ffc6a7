//! # User Interface Elements
//!
//! Everything drawn on screen, as plain text: glyph tables, the map
//! viewport, the word-wrapped message log and the inventory pane.
//!
//! Nothing here touches the terminal, so the layout can be tested without
//! one. [`TerminalDisplay`](crate::rendering::TerminalDisplay) only places
//! these lines on screen.

use crate::config;
use crate::game::{Entity, EntityKind, GameState, Player, Position, Terrain, World};
use crate::CrawlResult;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Box-drawing glyph for a terrain.
pub fn terrain_glyph(terrain: Terrain) -> char {
    match terrain {
        Terrain::Empty => ' ',
        Terrain::Floor => '.',
        Terrain::Corridor => '#',
        Terrain::CrossWall => '┼',
        Terrain::HorizontalWall => '─',
        Terrain::VerticalWall => '│',
        Terrain::UpperLeftWall => '┌',
        Terrain::UpperRightWall => '┐',
        Terrain::LowerRightWall => '┘',
        Terrain::LowerLeftWall => '└',
        Terrain::TopTeeWall => '┬',
        Terrain::RightTeeWall => '┤',
        Terrain::BottomTeeWall => '┴',
        Terrain::LeftTeeWall => '├',
        Terrain::HorizontalDoorOpen | Terrain::VerticalDoorOpen => '/',
        Terrain::HorizontalDoorClosed => '─',
        Terrain::VerticalDoorClosed => '│',
        Terrain::Trap => '^',
        Terrain::Player => '@',
    }
}

/// Glyph for an entity as the player sees it.
///
/// Closed doors continue the wall they sit in and unsprung traps pass for
/// floor.
///
/// # Examples
///
/// ```
/// use mazecrawl::{entity_glyph, Entity};
///
/// assert_eq!(entity_glyph(&Entity::door(true)), '─');
/// assert_eq!(entity_glyph(&Entity::trap()), '.');
/// assert_eq!(entity_glyph(&Entity::potion()), '!');
/// ```
pub fn entity_glyph(entity: &Entity) -> char {
    match entity.kind() {
        EntityKind::Door { open: true, .. } => '/',
        EntityKind::Door {
            open: false,
            horizontal: true,
        } => '─',
        EntityKind::Door {
            open: false,
            horizontal: false,
        } => '│',
        EntityKind::Trap { sprung: false } => '.',
        _ => entity.glyph(),
    }
}

/// What the player sees at `pos`: blank if never seen, `@` on the player,
/// otherwise the occupant over the terrain.
pub fn cell_glyph(world: &World, pos: Position) -> char {
    match world.get_tile(pos) {
        Some(tile) if tile.seen => {
            if pos == world.player_position() {
                '@'
            } else if let Some(entity) = world.entity_at(pos) {
                entity_glyph(entity)
            } else {
                terrain_glyph(tile.terrain)
            }
        }
        _ => ' ',
    }
}

/// Renders a `rows` x `cols` window of the map centred on the player.
///
/// Cells outside the map render blank.
pub fn render_map_lines(world: &World, rows: usize, cols: usize) -> Vec<String> {
    let centre = world.player_position();
    let top = centre.y - (rows / 2) as i32;
    let left = centre.x - (cols / 2) as i32;

    (0..rows as i32)
        .map(|dy| {
            (0..cols as i32)
                .map(|dx| cell_glyph(world, Position::new(left + dx, top + dy)))
                .collect()
        })
        .collect()
}

/// Title bar text, centred in `width` columns.
pub fn title_line(width: usize) -> String {
    format!("{:^width$}", GameState::version_banner(), width = width)
}

fn slot_line(slot: usize, entity: Option<&Entity>) -> String {
    match entity {
        Some(entity) => format!("{}) {}", slot, entity.description()),
        None => format!("{})", slot),
    }
}

/// The inventory pane: wielded slots 1-2, carried slots 3-6, then stamina.
///
/// # Examples
///
/// ```
/// use mazecrawl::{inventory_lines, Entity, Player};
///
/// let mut player = Player::new();
/// player.carry(Entity::potion()).unwrap();
/// let lines = inventory_lines(&player);
/// assert_eq!(lines[0], "wielding");
/// assert_eq!(lines[4], "3) a potion");
/// assert_eq!(lines.last().unwrap(), "stamina: 10");
/// ```
pub fn inventory_lines(player: &Player) -> Vec<String> {
    let mut lines = vec!["wielding".to_string()];
    lines.extend(
        player
            .wielded()
            .enumerate()
            .map(|(index, entity)| slot_line(index + 1, entity)),
    );
    lines.push("carrying".to_string());
    lines.extend(
        player
            .carried()
            .enumerate()
            .map(|(index, entity)| slot_line(index + 1 + config::WIELDED_SLOTS, entity)),
    );
    lines.push(String::new());
    lines.push(format!("stamina: {:2}", player.health()));
    lines
}

/// Scrolling message pane.
///
/// Messages are word-wrapped to the pane width and only the last
/// `capacity` wrapped lines are kept.
#[derive(Debug, Clone)]
pub struct MessageLog {
    lines: VecDeque<String>,
    width: usize,
    capacity: usize,
}

impl MessageLog {
    pub fn new(width: usize) -> Self {
        Self::with_capacity(width, config::MESSAGE_HISTORY)
    }

    pub fn with_capacity(width: usize, capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            width: width.max(1),
            capacity,
        }
    }

    /// Appends a message. Empty messages only clear the prompt and are not
    /// kept.
    pub fn push(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        for line in textwrap::wrap(text, self.width) {
            self.lines.push_back(line.into_owned());
        }
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }

    /// Changes the wrap width for messages pushed from now on.
    pub fn set_width(&mut self, width: usize) {
        self.width = width.max(1);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// An entity as it appears in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedEntity {
    pub position: Position,
    pub glyph: char,
    pub description: String,
}

/// Whole-map debugging view, fog of war ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub height: usize,
    pub width: usize,
    /// Terrain glyphs, one string per row
    pub rows: Vec<String>,
    /// Entities in row-major order
    pub entities: Vec<PlacedEntity>,
    pub player: Position,
}

impl MapSnapshot {
    pub fn from_world(world: &World) -> Self {
        let rows = (0..world.height())
            .map(|row| {
                (0..world.width())
                    .map(|col| terrain_glyph(world.terrain_at(Position::from_row_col(row, col))))
                    .collect()
            })
            .collect();

        let mut entities: Vec<PlacedEntity> = world
            .entities()
            .map(|(position, entity)| PlacedEntity {
                position,
                glyph: entity.glyph(),
                description: entity.description(),
            })
            .collect();
        entities.sort_by_key(|placed| (placed.position.y, placed.position.x));

        Self {
            height: world.height(),
            width: world.width(),
            rows,
            entities,
            player: world.player_position(),
        }
    }

    pub fn to_json(&self) -> CrawlResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip() -> World {
        World::from_layout(&["#.###", "#...#", "#####"]).unwrap()
    }

    #[test]
    fn test_door_and_trap_glyphs() {
        let mut door = Entity::door(false);
        assert_eq!(entity_glyph(&door), '│');
        door.set_door_open(true);
        assert_eq!(entity_glyph(&door), '/');

        let mut trap = Entity::trap();
        assert_eq!(entity_glyph(&trap), '.');
        trap.spring();
        assert_eq!(entity_glyph(&trap), '^');
    }

    #[test]
    fn test_wall_glyphs() {
        assert_eq!(terrain_glyph(Terrain::UpperLeftWall), '┌');
        assert_eq!(terrain_glyph(Terrain::TopTeeWall), '┬');
        assert_eq!(terrain_glyph(Terrain::BottomTeeWall), '┴');
        assert_eq!(terrain_glyph(Terrain::Empty), ' ');
    }

    #[test]
    fn test_unseen_cells_are_blank() {
        let mut world = strip();
        world.update_visibility();
        // Player at (1,0); (3,1) is two columns away and never seen
        assert_eq!(cell_glyph(&world, Position::new(1, 0)), '@');
        assert_eq!(cell_glyph(&world, Position::new(2, 1)), '.');
        assert_eq!(cell_glyph(&world, Position::new(3, 1)), ' ');
        assert_eq!(cell_glyph(&world, Position::new(-4, 0)), ' ');
    }

    #[test]
    fn test_entities_drawn_over_terrain() {
        let mut world = strip();
        world.insert_entity(Position::new(2, 1), Entity::key());
        world.update_visibility();
        assert_eq!(cell_glyph(&world, Position::new(2, 1)), 'k');
    }

    #[test]
    fn test_viewport_centres_on_player() {
        let mut world = strip();
        world.update_visibility();
        let lines = render_map_lines(&world, 3, 3);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].chars().nth(1), Some('@'));
        // The row above the map is blank
        assert_eq!(lines[0], "   ");
        assert_eq!(lines[2].chars().collect::<Vec<_>>(), vec!['┼', '.', '.']);
    }

    #[test]
    fn test_message_log_wraps_and_scrolls() {
        let mut log = MessageLog::with_capacity(10, 3);
        log.push("The orc hits you.");
        assert_eq!(log.lines().collect::<Vec<_>>(), vec!["The orc", "hits you."]);
        log.push("");
        assert_eq!(log.len(), 2);
        log.push("You hit the orc.");
        assert_eq!(log.len(), 3);
        assert_eq!(log.lines().next(), Some("hits you."));
    }

    #[test]
    fn test_inventory_pane_layout() {
        let mut player = Player::new();
        player.wield(Entity::weapon("a", "sword", 1, 0)).unwrap();
        let lines = inventory_lines(&player);
        assert_eq!(
            lines,
            vec![
                "wielding",
                "1) a sword",
                "2)",
                "carrying",
                "3)",
                "4)",
                "5)",
                "6)",
                "",
                "stamina: 10",
            ]
        );
        player.stats.apply_health_delta(-7);
        assert_eq!(inventory_lines(&player).last().map(String::as_str), Some("stamina:  3"));
    }

    #[test]
    fn test_snapshot_lists_everything() {
        let mut world = strip();
        world.insert_entity(Position::new(3, 1), Entity::potion());
        world.insert_entity(Position::new(2, 1), Entity::trap());
        let snapshot = MapSnapshot::from_world(&world);
        assert_eq!(snapshot.rows[0], "┼.┼┼┼");
        assert_eq!(snapshot.entities.len(), 2);
        assert_eq!(snapshot.entities[0].glyph, '^');
        assert_eq!(snapshot.entities[1].description, "a potion");
        let json = snapshot.to_json().unwrap();
        let back: MapSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
