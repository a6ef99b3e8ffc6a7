//! # Player
//!
//! The player character: combat stats, facing, the transient flags that turn
//! single actions into repeated ones, and a fixed-size inventory.
//!
//! Inventory slots are addressed by a combined 1-based index: 1-2 are the
//! wielded slots and 3-6 the carried slots. Entities move in and out of slots
//! by value, so an entity is always owned by exactly one slot, the world, or
//! the local scope moving it.

use crate::config;
use crate::game::{ArmamentBonuses, CombatStats, Direction, Entity, EntityKind};
use serde::{Deserialize, Serialize};

/// The player character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Health, offense and defense
    pub stats: CombatStats,
    /// Direction the next directed action applies to
    pub facing: Direction,
    /// Keep resolving combat rounds until someone dies
    pub keep_fighting: bool,
    /// Keep stepping until something interrupts the run
    pub keep_moving: bool,
    /// Pick up items (and spring traps) when stepping onto them
    pub pickup_on_entry: bool,
    wielded: [Option<Entity>; config::WIELDED_SLOTS],
    carried: [Option<Entity>; config::CARRIED_SLOTS],
}

impl Player {
    /// Creates a fresh player with starting stats and an empty pack.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazecrawl::Player;
    ///
    /// let player = Player::new();
    /// assert_eq!(player.stats.health(), 10);
    /// assert_eq!(player.held_count(), 0);
    /// ```
    pub fn new() -> Self {
        Self {
            stats: CombatStats::new(config::PLAYER_START_HEALTH, 0, 0),
            facing: Direction::South,
            keep_fighting: false,
            keep_moving: false,
            pickup_on_entry: true,
            wielded: Default::default(),
            carried: Default::default(),
        }
    }

    pub fn health(&self) -> i32 {
        self.stats.health()
    }

    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    /// Puts an entity in the first free carried slot.
    ///
    /// Hands the entity back if every slot is taken.
    pub fn carry(&mut self, entity: Entity) -> Result<(), Entity> {
        match self.carried.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(entity);
                Ok(())
            }
            None => Err(entity),
        }
    }

    /// Puts an armament in the first free wielded slot.
    ///
    /// Hands the entity back if it has no armament capability or both hands
    /// are full.
    pub fn wield(&mut self, entity: Entity) -> Result<(), Entity> {
        if entity.armament().is_none() {
            return Err(entity);
        }
        match self.wielded.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(entity);
                Ok(())
            }
            None => Err(entity),
        }
    }

    /// Removes and returns whatever is in the 1-based combined slot.
    ///
    /// Returns `None` for an empty slot or an index outside 1-6.
    pub fn drop_slot(&mut self, slot: usize) -> Option<Entity> {
        match slot {
            1..=config::WIELDED_SLOTS => self.wielded[slot - 1].take(),
            _ if slot > config::WIELDED_SLOTS
                && slot <= config::WIELDED_SLOTS + config::CARRIED_SLOTS =>
            {
                self.carried[slot - config::WIELDED_SLOTS - 1].take()
            }
            _ => None,
        }
    }

    /// Wielded slots in order, empty ones included.
    pub fn wielded(&self) -> impl Iterator<Item = Option<&Entity>> {
        self.wielded.iter().map(Option::as_ref)
    }

    /// Carried slots in order, empty ones included.
    pub fn carried(&self) -> impl Iterator<Item = Option<&Entity>> {
        self.carried.iter().map(Option::as_ref)
    }

    /// Number of entities held across both slot arrays.
    pub fn held_count(&self) -> usize {
        self.wielded.iter().chain(self.carried.iter()).flatten().count()
    }

    /// Sum of the bonuses of everything wielded.
    pub fn armament_bonus(&self) -> ArmamentBonuses {
        self.wielded
            .iter()
            .flatten()
            .filter_map(Entity::armament)
            .fold(ArmamentBonuses::default(), |total, bonus| total + *bonus)
    }

    /// Whether a key is among the carried items.
    pub fn has_key(&self) -> bool {
        self.carried
            .iter()
            .flatten()
            .any(|entity| entity.kind() == EntityKind::Key)
    }

    /// Removes the first carried potion, if any.
    pub fn take_potion(&mut self) -> Option<Entity> {
        self.carried
            .iter_mut()
            .find(|slot| matches!(slot, Some(entity) if entity.kind() == EntityKind::Potion))
            .and_then(Option::take)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carry_fills_slots_in_order_until_full() {
        let mut player = Player::new();
        for _ in 0..config::CARRIED_SLOTS {
            assert!(player.carry(Entity::potion()).is_ok());
        }
        let rejected = player.carry(Entity::key());
        assert_eq!(rejected, Err(Entity::key()));
        assert_eq!(player.held_count(), config::CARRIED_SLOTS);
    }

    #[test]
    fn test_wield_requires_armament() {
        let mut player = Player::new();
        assert_eq!(player.wield(Entity::key()), Err(Entity::key()));
        assert!(player.wield(Entity::weapon("a", "sword", 1, 0)).is_ok());
        assert!(player.wield(Entity::shield("a", "shield", 0, 2)).is_ok());
        assert!(player.wield(Entity::weapon("a", "battleaxe", 2, 0)).is_err());
        assert_eq!(player.armament_bonus(), ArmamentBonuses::new(1, 2));
    }

    #[test]
    fn test_drop_uses_combined_one_based_index() {
        let mut player = Player::new();
        player.wield(Entity::weapon("a", "sword", 1, 0)).unwrap();
        player.carry(Entity::key()).unwrap();
        player.carry(Entity::potion()).unwrap();

        assert_eq!(player.drop_slot(0), None);
        assert_eq!(player.drop_slot(2), None);
        assert_eq!(player.drop_slot(7), None);
        assert_eq!(player.drop_slot(4).map(|e| e.kind()), Some(EntityKind::Potion));
        assert_eq!(player.drop_slot(3).map(|e| e.kind()), Some(EntityKind::Key));
        assert_eq!(player.drop_slot(1).map(|e| e.kind()), Some(EntityKind::Weapon));
        assert_eq!(player.held_count(), 0);
    }

    #[test]
    fn test_freed_slot_is_reused() {
        let mut player = Player::new();
        for _ in 0..config::CARRIED_SLOTS {
            player.carry(Entity::potion()).unwrap();
        }
        player.drop_slot(4);
        assert!(player.carry(Entity::key()).is_ok());
        assert_eq!(player.carried().nth(1).flatten().map(Entity::kind), Some(EntityKind::Key));
    }

    #[test]
    fn test_key_and_potion_lookup() {
        let mut player = Player::new();
        assert!(!player.has_key());
        assert!(player.take_potion().is_none());

        player.carry(Entity::key()).unwrap();
        player.carry(Entity::potion()).unwrap();
        player.carry(Entity::potion()).unwrap();
        assert!(player.has_key());

        assert!(player.take_potion().is_some());
        assert_eq!(player.held_count(), 2);
        assert!(player.take_potion().is_some());
        assert!(player.take_potion().is_none());
    }
}
