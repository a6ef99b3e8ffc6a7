//! # Population
//!
//! Weighted draws deciding what occupies a freshly carved cell.
//!
//! Half of all cells stay empty. The rest get a monster, an item or a trap.
//! Monsters come from one of three rosters depending on how far down the
//! map the cell is, so the maze gets harder towards the exit.

use crate::game::{Entity, MonsterKind};
use rand::rngs::StdRng;
use rand::Rng;

/// Broad outcome of the first percentile roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    Nothing,
    Monster,
    Item,
    Trap,
}

impl Occupant {
    /// Maps a percentile roll to an outcome: 50% nothing, 25% monster, 15%
    /// item, 10% trap.
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            0..=49 => Occupant::Nothing,
            50..=74 => Occupant::Monster,
            75..=89 => Occupant::Item,
            _ => Occupant::Trap,
        }
    }
}

/// Difficulty band of a map row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowBand {
    Top,
    Middle,
    Bottom,
}

impl RowBand {
    pub fn for_row(row: usize, height: usize) -> Self {
        if row < height / 3 {
            RowBand::Top
        } else if row < height * 2 / 3 {
            RowBand::Middle
        } else {
            RowBand::Bottom
        }
    }
}

/// The boss waiting on the exit cell.
pub fn dragon() -> Entity {
    Entity::monster("the", "dragon", MonsterKind::Dragon, 1, 6, 6)
}

/// Picks a monster from a band's roster with a roll in `[0, 10)`.
///
/// # Examples
///
/// ```
/// use mazecrawl::{monster_for_roll, MonsterKind, RowBand};
///
/// let monster = monster_for_roll(RowBand::Middle, 5);
/// assert_eq!(monster.monster_kind(), Some(MonsterKind::Orc));
/// assert_eq!(monster.description(), "an orc");
/// ```
pub fn monster_for_roll(band: RowBand, roll: u32) -> Entity {
    let (article, name, kind, health, offense, defense) = match band {
        RowBand::Top => match roll {
            0..=3 => ("a", "vampire bat", MonsterKind::VampireBat, 1, 0, 2),
            4..=7 => ("a", "giant rat", MonsterKind::GiantRat, 1, 1, 1),
            8 => ("a", "zombie", MonsterKind::Zombie, 1, 1, 1),
            _ => ("a", "kobold", MonsterKind::Kobold, 1, 1, 2),
        },
        RowBand::Middle => match roll {
            0..=3 => ("a", "hobgoblin", MonsterKind::Hobgoblin, 1, 1, 2),
            4..=7 => ("an", "orc", MonsterKind::Orc, 1, 2, 2),
            8 => ("a", "giant spider", MonsterKind::GiantSpider, 1, 3, 2),
            _ => ("a", "gelatinous cube", MonsterKind::GelatinousCube, 1, 1, 5),
        },
        RowBand::Bottom => match roll {
            0..=1 => ("a", "lizard man", MonsterKind::LizardMan, 1, 2, 4),
            2..=3 => ("a", "naga", MonsterKind::Naga, 1, 3, 3),
            4..=5 => ("a", "troll", MonsterKind::Troll, 1, 4, 2),
            6..=7 => ("a", "minotaur", MonsterKind::Minotaur, 1, 5, 3),
            8 => ("a", "wizard", MonsterKind::Wizard, 1, 5, 5),
            _ => ("a", "floating eye", MonsterKind::FloatingEye, 1, 5, 5),
        },
    };
    Entity::monster(article, name, kind, health, offense, defense)
}

/// Picks an item with a percentile roll.
pub fn item_for_roll(roll: u32) -> Entity {
    match roll {
        0..=39 => Entity::potion(),
        40..=59 => Entity::key(),
        60..=69 => Entity::shield("a", "buckler", 0, 1),
        70..=79 => Entity::shield("a", "shield", 0, 2),
        80..=89 => Entity::weapon("a", "sword", 1, 0),
        _ => Entity::weapon("a", "battleaxe", 2, 0),
    }
}

/// Draws the occupant of an ordinary carved cell, if any.
pub fn roll_occupant(row: usize, height: usize, rng: &mut StdRng) -> Option<Entity> {
    match Occupant::from_roll(rng.gen_range(0..100)) {
        Occupant::Nothing => None,
        Occupant::Monster => Some(monster_for_roll(
            RowBand::for_row(row, height),
            rng.gen_range(0..10),
        )),
        Occupant::Item => Some(item_for_roll(rng.gen_range(0..100))),
        Occupant::Trap => Some(Entity::trap()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::EntityKind;
    use rand::SeedableRng;

    #[test]
    fn test_occupant_thresholds() {
        assert_eq!(Occupant::from_roll(0), Occupant::Nothing);
        assert_eq!(Occupant::from_roll(49), Occupant::Nothing);
        assert_eq!(Occupant::from_roll(50), Occupant::Monster);
        assert_eq!(Occupant::from_roll(74), Occupant::Monster);
        assert_eq!(Occupant::from_roll(75), Occupant::Item);
        assert_eq!(Occupant::from_roll(89), Occupant::Item);
        assert_eq!(Occupant::from_roll(90), Occupant::Trap);
        assert_eq!(Occupant::from_roll(99), Occupant::Trap);
    }

    #[test]
    fn test_row_bands_on_standard_map() {
        assert_eq!(RowBand::for_row(1, 15), RowBand::Top);
        assert_eq!(RowBand::for_row(4, 15), RowBand::Top);
        assert_eq!(RowBand::for_row(5, 15), RowBand::Middle);
        assert_eq!(RowBand::for_row(9, 15), RowBand::Middle);
        assert_eq!(RowBand::for_row(10, 15), RowBand::Bottom);
        assert_eq!(RowBand::for_row(14, 15), RowBand::Bottom);
    }

    #[test]
    fn test_rosters() {
        let kind = |band, roll| monster_for_roll(band, roll).monster_kind();
        assert_eq!(kind(RowBand::Top, 3), Some(MonsterKind::VampireBat));
        assert_eq!(kind(RowBand::Top, 8), Some(MonsterKind::Zombie));
        assert_eq!(kind(RowBand::Top, 9), Some(MonsterKind::Kobold));
        assert_eq!(kind(RowBand::Middle, 9), Some(MonsterKind::GelatinousCube));
        assert_eq!(kind(RowBand::Bottom, 1), Some(MonsterKind::LizardMan));
        assert_eq!(kind(RowBand::Bottom, 5), Some(MonsterKind::Troll));
        assert_eq!(kind(RowBand::Bottom, 8), Some(MonsterKind::Wizard));
        assert_eq!(kind(RowBand::Bottom, 9), Some(MonsterKind::FloatingEye));

        let cube = monster_for_roll(RowBand::Middle, 9);
        assert_eq!(cube.combat().map(|c| c.defense()), Some(5));
        let dragon = dragon();
        assert_eq!(dragon.description(), "the dragon");
        assert_eq!(dragon.combat().map(|c| (c.offense(), c.defense())), Some((6, 6)));
    }

    #[test]
    fn test_items() {
        assert_eq!(item_for_roll(0).kind(), EntityKind::Potion);
        assert_eq!(item_for_roll(59).kind(), EntityKind::Key);
        assert_eq!(item_for_roll(65).name(), "buckler");
        assert_eq!(item_for_roll(75).armament().map(|a| a.defense_bonus()), Some(2));
        assert_eq!(item_for_roll(85).name(), "sword");
        assert_eq!(item_for_roll(99).armament().map(|a| a.offense_bonus()), Some(2));
    }

    #[test]
    fn test_roll_occupant_mix() {
        let mut rng = StdRng::seed_from_u64(5);
        let draws: Vec<Option<Entity>> = (0..2000).map(|_| roll_occupant(1, 15, &mut rng)).collect();
        let empty = draws.iter().filter(|d| d.is_none()).count();
        assert!(empty > 800 && empty < 1200, "{} empty draws", empty);
        assert!(draws.iter().flatten().any(|e| e.is_trap()));
        // Top rows never see bottom-band monsters
        assert!(!draws
            .iter()
            .flatten()
            .any(|e| e.monster_kind() == Some(MonsterKind::Troll)));
    }
}
