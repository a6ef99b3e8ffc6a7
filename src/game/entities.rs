//! # Entities
//!
//! Everything that can occupy a map cell besides the player: doors, traps,
//! monsters and items.
//!
//! An [`Entity`] is one identity record (article, name, kind) with optional
//! capability records attached. Monsters carry [`CombatStats`]; weapons and
//! shields carry [`ArmamentBonuses`]. Capability checks look at which records
//! are present rather than probing the kind.
//!
//! All stat mutators apply a signed delta to the current value. Nothing in
//! the game ever assigns a stat outright.

use crate::utils::Dice;
use serde::{Deserialize, Serialize};

/// Health, offense and defense shared by the player and monsters.
///
/// # Examples
///
/// ```
/// use mazecrawl::CombatStats;
///
/// let mut stats = CombatStats::new(10, 0, 0);
/// stats.apply_health_delta(-3);
/// stats.apply_health_delta(1);
/// assert_eq!(stats.health(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    health: i32,
    offense: i32,
    defense: i32,
}

impl CombatStats {
    /// Creates stats with the given starting values.
    pub fn new(health: i32, offense: i32, defense: i32) -> Self {
        Self {
            health,
            offense,
            defense,
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    /// Adds `delta` to the current health.
    pub fn apply_health_delta(&mut self, delta: i32) {
        self.health += delta;
    }

    pub fn offense(&self) -> i32 {
        self.offense
    }

    /// Adds `delta` to the current offense.
    pub fn apply_offense_delta(&mut self, delta: i32) {
        self.offense += delta;
    }

    pub fn defense(&self) -> i32 {
        self.defense
    }

    /// Adds `delta` to the current defense.
    pub fn apply_defense_delta(&mut self, delta: i32) {
        self.defense += delta;
    }

    /// Rolls an attack: 2d6 (0-based faces) plus offense.
    pub fn attack(&self, dice: &mut Dice) -> i32 {
        dice.roll_2d6() + self.offense
    }

    /// Rolls a defence: 2d6 (0-based faces) plus defense.
    pub fn defend(&self, dice: &mut Dice) -> i32 {
        dice.roll_2d6() + self.defense
    }

    /// Health below 1 is death.
    pub fn is_alive(&self) -> bool {
        self.health >= 1
    }
}

/// Offense and defense bonuses contributed by wielded gear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmamentBonuses {
    offense_bonus: i32,
    defense_bonus: i32,
}

impl ArmamentBonuses {
    pub fn new(offense_bonus: i32, defense_bonus: i32) -> Self {
        Self {
            offense_bonus,
            defense_bonus,
        }
    }

    pub fn offense_bonus(&self) -> i32 {
        self.offense_bonus
    }

    /// Adds `delta` to the current offense bonus.
    pub fn apply_offense_bonus_delta(&mut self, delta: i32) {
        self.offense_bonus += delta;
    }

    pub fn defense_bonus(&self) -> i32 {
        self.defense_bonus
    }

    /// Adds `delta` to the current defense bonus.
    pub fn apply_defense_bonus_delta(&mut self, delta: i32) {
        self.defense_bonus += delta;
    }
}

impl std::ops::Add for ArmamentBonuses {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.offense_bonus + other.offense_bonus,
            self.defense_bonus + other.defense_bonus,
        )
    }
}

/// Every monster that can appear in the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    VampireBat,
    GiantRat,
    Zombie,
    Kobold,
    Hobgoblin,
    Orc,
    GiantSpider,
    GelatinousCube,
    LizardMan,
    Naga,
    Troll,
    Minotaur,
    Wizard,
    FloatingEye,
    /// The boss waiting on the exit cell
    Dragon,
}

impl MonsterKind {
    /// Map glyph for this monster.
    pub fn glyph(self) -> char {
        match self {
            MonsterKind::VampireBat => 'B',
            MonsterKind::GiantRat => 'R',
            MonsterKind::Zombie => 'Z',
            MonsterKind::Kobold => 'K',
            MonsterKind::Hobgoblin => 'H',
            MonsterKind::Orc => 'O',
            MonsterKind::GiantSpider => 'S',
            MonsterKind::GelatinousCube => 'C',
            MonsterKind::LizardMan => 'L',
            MonsterKind::Naga => 'N',
            MonsterKind::Troll => 'T',
            MonsterKind::Minotaur => 'M',
            MonsterKind::Wizard => 'W',
            MonsterKind::FloatingEye => 'F',
            MonsterKind::Dragon => 'D',
        }
    }
}

/// Kind tag for an entity, with the small amount of per-kind state doors and
/// traps need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// `horizontal` only affects the glyph.
    Door { open: bool, horizontal: bool },
    Trap { sprung: bool },
    Monster(MonsterKind),
    Weapon,
    Shield,
    Key,
    Potion,
}

/// A thing placed on the map or held by the player.
///
/// # Examples
///
/// ```
/// use mazecrawl::Entity;
///
/// let sword = Entity::weapon("a", "sword", 1, 0);
/// assert!(sword.armament().is_some());
/// assert!(sword.is_liftable());
/// assert_eq!(sword.description(), "a sword");
///
/// let door = Entity::door(false);
/// assert!(!door.is_liftable());
/// assert_eq!(door.door_is_open(), Some(false));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    article: String,
    name: String,
    kind: EntityKind,
    combat: Option<CombatStats>,
    armament: Option<ArmamentBonuses>,
}

impl Entity {
    fn bare(article: &str, name: &str, kind: EntityKind) -> Self {
        Self {
            article: article.to_string(),
            name: name.to_string(),
            kind,
            combat: None,
            armament: None,
        }
    }

    /// A closed door.
    pub fn door(horizontal: bool) -> Self {
        Self::bare(
            "a",
            "door",
            EntityKind::Door {
                open: false,
                horizontal,
            },
        )
    }

    /// An unsprung trap.
    pub fn trap() -> Self {
        Self::bare("a", "trap", EntityKind::Trap { sprung: false })
    }

    pub fn monster(
        article: &str,
        name: &str,
        kind: MonsterKind,
        health: i32,
        offense: i32,
        defense: i32,
    ) -> Self {
        let mut entity = Self::bare(article, name, EntityKind::Monster(kind));
        entity.combat = Some(CombatStats::new(health, offense, defense));
        entity
    }

    pub fn weapon(article: &str, name: &str, offense_bonus: i32, defense_bonus: i32) -> Self {
        let mut entity = Self::bare(article, name, EntityKind::Weapon);
        entity.armament = Some(ArmamentBonuses::new(offense_bonus, defense_bonus));
        entity
    }

    pub fn shield(article: &str, name: &str, offense_bonus: i32, defense_bonus: i32) -> Self {
        let mut entity = Self::bare(article, name, EntityKind::Shield);
        entity.armament = Some(ArmamentBonuses::new(offense_bonus, defense_bonus));
        entity
    }

    pub fn key() -> Self {
        Self::bare("a", "key", EntityKind::Key)
    }

    pub fn potion() -> Self {
        Self::bare("a", "potion", EntityKind::Potion)
    }

    pub fn article(&self) -> &str {
        &self.article
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Article and name, e.g. "an orc".
    pub fn description(&self) -> String {
        format!("{} {}", self.article, self.name)
    }

    pub fn combat(&self) -> Option<&CombatStats> {
        self.combat.as_ref()
    }

    pub fn combat_mut(&mut self) -> Option<&mut CombatStats> {
        self.combat.as_mut()
    }

    pub fn armament(&self) -> Option<&ArmamentBonuses> {
        self.armament.as_ref()
    }

    pub fn monster_kind(&self) -> Option<MonsterKind> {
        match self.kind {
            EntityKind::Monster(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_door(&self) -> bool {
        matches!(self.kind, EntityKind::Door { .. })
    }

    /// `Some(open)` for doors, `None` for everything else.
    pub fn door_is_open(&self) -> Option<bool> {
        match self.kind {
            EntityKind::Door { open, .. } => Some(open),
            _ => None,
        }
    }

    /// Sets a door's open flag. Returns false if this is not a door.
    pub fn set_door_open(&mut self, is_open: bool) -> bool {
        match &mut self.kind {
            EntityKind::Door { open, .. } => {
                *open = is_open;
                true
            }
            _ => false,
        }
    }

    pub fn is_trap(&self) -> bool {
        matches!(self.kind, EntityKind::Trap { .. })
    }

    /// `Some(sprung)` for traps, `None` for everything else.
    pub fn trap_is_sprung(&self) -> Option<bool> {
        match self.kind {
            EntityKind::Trap { sprung } => Some(sprung),
            _ => None,
        }
    }

    /// Marks a trap as sprung. Returns false if this is not a trap.
    pub fn spring(&mut self) -> bool {
        match &mut self.kind {
            EntityKind::Trap { sprung } => {
                *sprung = true;
                true
            }
            _ => false,
        }
    }

    /// Doors, traps and monsters stay where they are.
    pub fn is_liftable(&self) -> bool {
        !matches!(
            self.kind,
            EntityKind::Door { .. } | EntityKind::Trap { .. } | EntityKind::Monster(_)
        )
    }

    /// Map glyph for everything but doors and traps, whose look depends on
    /// their state and is decided by the renderer.
    pub fn glyph(&self) -> char {
        match self.kind {
            EntityKind::Monster(kind) => kind.glyph(),
            EntityKind::Weapon => ')',
            EntityKind::Shield => ']',
            EntityKind::Potion => '!',
            EntityKind::Key => 'k',
            EntityKind::Door { .. } => '+',
            EntityKind::Trap { .. } => '^',
        }
    }
}
