//! # Game State Module
//!
//! The game session and the turn-based state machine that drives it.
//!
//! [`GameState`] owns the world, the player and the dice. Each call to
//! [`GameState::step`] performs exactly one transition of the machine:
//!
//! - `Command` reads a command and resolves it
//! - `Fighting` resolves one more combat round against the faced cell
//! - `Moving` resolves one step in the facing direction
//! - `Dead` shows the end prompt and moves on to `Quit`
//! - `Error` raises an alert and returns to `Command`
//! - `Quit` is terminal
//!
//! Resolvers never fail for player mistakes. They report a message through
//! the [`GameInterface`] and return [`TurnState::Error`]. Rust errors are
//! reserved for the interface itself failing.

use crate::config;
use crate::game::{Direction, Entity, EntityKind, MonsterKind, Player, Position, World};
use crate::generation::{create_rng, GenerationConfig, Generator, MazeGenerator};
use crate::input::{Command, DirectionInput, GameInterface};
use crate::utils::Dice;
use crate::CrawlResult;
use log::{debug, info, trace, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// States of the turn machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    /// Waiting for a command
    Command,
    /// Fighting to the death, one round per step
    Fighting,
    /// Running, one step per step
    Moving,
    /// The game is over, won or lost
    Dead,
    /// Terminal
    Quit,
    /// Something failed; alert, then back to `Command`
    Error,
}

/// Game statistics tracking player progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Commands read
    pub turns: u64,
    /// Cells entered
    pub steps_taken: u64,
    /// Monsters killed
    pub monsters_killed: u32,
    /// Items picked up
    pub items_collected: u32,
    /// Health lost, from every source
    pub damage_taken: u64,
    /// Hits landed on monsters
    pub damage_dealt: u64,
}

impl GameStatistics {
    pub fn new() -> Self {
        Self::default()
    }
}

/// How the game ended, if it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameCompletionState {
    /// Game is still in progress
    Playing,
    /// The dragon is dead
    Won,
    /// The player is dead
    Died,
    /// The player quit
    Quit,
}

/// One game session.
#[derive(Debug, Clone)]
pub struct GameState {
    /// The maze and everything placed in it
    pub world: World,
    /// The player character
    pub player: Player,
    /// Combat dice
    pub dice: Dice,
    /// Current state of the turn machine
    pub turn_state: TurnState,
    /// Progress counters
    pub statistics: GameStatistics,
    /// Outcome so far
    pub completion_state: GameCompletionState,
}

impl GameState {
    /// Wraps an existing world with a fresh player standing where the world
    /// says the player is.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazecrawl::{Dice, GameState, TurnState, World};
    ///
    /// let world = World::from_layout(&["#.#", "#.#", "###"]).unwrap();
    /// let state = GameState::new(world, Dice::seeded(1));
    /// assert_eq!(state.turn_state, TurnState::Command);
    /// assert_eq!(state.player.health(), 10);
    /// ```
    pub fn new(world: World, dice: Dice) -> Self {
        let mut state = Self {
            world,
            player: Player::new(),
            dice,
            turn_state: TurnState::Command,
            statistics: GameStatistics::new(),
            completion_state: GameCompletionState::Playing,
        };
        state.world.update_visibility();
        state
    }

    /// Generates a new maze from `config` and starts a game in it.
    pub fn new_game(config: &GenerationConfig) -> CrawlResult<Self> {
        let mut rng = create_rng(config);
        let world = MazeGenerator::new().generate(config, &mut rng)?;
        let dice = Dice::seeded(rng.gen());
        info!(
            "New game: {}x{} maze from seed {}, {} entities placed",
            world.height(),
            world.width(),
            config.seed,
            world.entity_count()
        );
        Ok(Self::new(world, dice))
    }

    /// "name version", shown at start and on request.
    pub fn version_banner() -> String {
        format!("{} {}", crate::NAME, crate::VERSION)
    }

    pub fn player_position(&self) -> Position {
        self.world.player_position()
    }

    /// The cell one step ahead in the player's facing.
    pub fn facing_target(&self) -> Position {
        self.player_position().step(self.player.facing)
    }

    pub fn is_game_ended(&self) -> bool {
        self.turn_state == TurnState::Quit
    }

    /// Runs the machine until it quits and reports how the game ended.
    pub fn run(&mut self, ui: &mut dyn GameInterface) -> CrawlResult<GameCompletionState> {
        self.world.update_visibility();
        ui.resize(self)?;
        ui.message(&Self::version_banner());

        while !self.is_game_ended() {
            self.step(ui)?;
        }

        if self.completion_state == GameCompletionState::Playing {
            self.completion_state = GameCompletionState::Quit;
        }
        info!(
            "Game over: {:?} after {} turns ({} steps, {} kills, {} items, {} damage taken)",
            self.completion_state,
            self.statistics.turns,
            self.statistics.steps_taken,
            self.statistics.monsters_killed,
            self.statistics.items_collected,
            self.statistics.damage_taken
        );
        Ok(self.completion_state)
    }

    /// Performs one transition and redraws.
    pub fn step(&mut self, ui: &mut dyn GameInterface) -> CrawlResult<TurnState> {
        let next = match self.turn_state {
            TurnState::Command => {
                let command = ui.read_command(self)?;
                self.statistics.turns += 1;
                self.handle_command(command, ui)?
            }
            TurnState::Fighting => self.fight(ui),
            TurnState::Moving => self.move_player(ui),
            TurnState::Dead => self.dead(ui)?,
            TurnState::Quit => TurnState::Quit,
            TurnState::Error => {
                ui.alert();
                TurnState::Command
            }
        };

        if next != self.turn_state {
            debug!("Turn state {:?} -> {:?}", self.turn_state, next);
        }
        self.turn_state = next;
        self.world.update_visibility();
        ui.redraw(self)?;
        Ok(next)
    }

    /// Resolves a top-level command.
    pub fn handle_command(
        &mut self,
        command: Command,
        ui: &mut dyn GameInterface,
    ) -> CrawlResult<TurnState> {
        trace!("Command {:?}", command);
        let next = match command {
            Command::Move(direction) => self.start_moving(direction, false),
            Command::Run(direction) => self.start_moving(direction, true),
            Command::MoveOver => self.directed(command, ui, Self::move_player, |player| {
                player.pickup_on_entry = false;
                player.keep_moving = false;
            })?,
            Command::RunOver => self.directed(command, ui, Self::move_player, |player| {
                player.pickup_on_entry = false;
                player.keep_moving = true;
            })?,
            Command::Fight => self.directed(command, ui, Self::fight, |player| {
                player.keep_fighting = false;
            })?,
            Command::FightToDeath => self.directed(command, ui, Self::fight, |player| {
                player.keep_fighting = true;
            })?,
            Command::Open => {
                if self.player.has_key() {
                    self.directed(command, ui, Self::open_door, |_| {})?
                } else {
                    ui.message("You don't have the key.");
                    TurnState::Error
                }
            }
            Command::Close => self.directed(command, ui, Self::close_door, |_| {})?,
            Command::Batter => self.directed(command, ui, Self::batter, |_| {})?,
            Command::Take => self.take(ui),
            Command::Drop => self.drop_item(ui)?,
            Command::Wield => self.wield(ui)?,
            Command::Unwield => self.unwield(ui)?,
            Command::Quaff => self.quaff(ui),
            Command::Quit => self.quit(ui)?,
            Command::Version => {
                ui.message(&Self::version_banner());
                TurnState::Command
            }
            Command::Refresh => {
                ui.refresh(self)?;
                TurnState::Command
            }
            Command::Resize => {
                ui.resize(self)?;
                TurnState::Command
            }
            Command::Unrecognized => {
                ui.message("Unrecognized input.");
                TurnState::Error
            }
        };
        Ok(next)
    }

    fn start_moving(&mut self, direction: Direction, run: bool) -> TurnState {
        self.player.facing = direction;
        self.player.pickup_on_entry = true;
        self.player.keep_moving = run;
        TurnState::Moving
    }

    /// Prompts for a direction, then sets the player's flags with `arm`,
    /// faces the direction and runs `resolver`.
    ///
    /// Esc or a bad key leaves the player untouched.
    fn directed(
        &mut self,
        command: Command,
        ui: &mut dyn GameInterface,
        resolver: fn(&mut Self, &mut dyn GameInterface) -> TurnState,
        arm: fn(&mut Player),
    ) -> CrawlResult<TurnState> {
        let verb = command.direction_prompt().unwrap_or("act");
        ui.message(&format!("{} in which direction?", verb));

        match ui.read_direction(self)? {
            DirectionInput::Direction(direction) => {
                arm(&mut self.player);
                self.player.facing = direction;
                Ok(resolver(self, ui))
            }
            DirectionInput::Cancelled => {
                ui.message("");
                Ok(TurnState::Command)
            }
            DirectionInput::None => {
                ui.message("Huh?");
                Ok(TurnState::Error)
            }
        }
    }

    /// Takes one step in the facing direction.
    ///
    /// A step that ends anything but a run clears the run flag.
    pub fn move_player(&mut self, ui: &mut dyn GameInterface) -> TurnState {
        let next = self.resolve_step(ui);
        if next != TurnState::Moving {
            self.player.keep_moving = false;
        }
        next
    }

    fn resolve_step(&mut self, ui: &mut dyn GameInterface) -> TurnState {
        let target = self.facing_target();

        if !self.world.is_passable(target) {
            if self.player.keep_moving {
                return TurnState::Command;
            }
            ui.message("You can't go there!");
            return TurnState::Error;
        }

        let mut interrupted = false;
        match self.world.entity_at(target).map(Entity::kind) {
            Some(EntityKind::Door { open: false, .. }) => {
                ui.message("The door is shut.");
                return TurnState::Error;
            }
            Some(EntityKind::Monster(_)) => return self.fight_here(target, ui),
            Some(EntityKind::Trap { sprung: false }) if self.player.pickup_on_entry => {
                ui.message("You have stepped in a trap.");
                self.hurt_player(config::HAZARD_DAMAGE);
                if !self.player.is_alive() {
                    ui.message("You are dead.");
                    self.completion_state = GameCompletionState::Died;
                    return TurnState::Dead;
                }
                if let Some(trap) = self.world.entity_at_mut(target) {
                    trap.spring();
                }
                interrupted = true;
            }
            Some(EntityKind::Door { .. }) | Some(EntityKind::Trap { .. }) | None => {}
            Some(_) if self.player.pickup_on_entry => return self.take_here(target, ui),
            Some(_) => {}
        }

        self.enter(target);
        if self.player.keep_moving && !interrupted {
            TurnState::Moving
        } else {
            TurnState::Command
        }
    }

    fn enter(&mut self, target: Position) {
        self.world.set_player_position(target);
        self.statistics.steps_taken += 1;
    }

    fn hurt_player(&mut self, amount: i32) {
        self.player.stats.apply_health_delta(-amount);
        self.statistics.damage_taken += amount.max(0) as u64;
    }

    /// One combat round against whatever is in the faced cell.
    pub fn fight(&mut self, ui: &mut dyn GameInterface) -> TurnState {
        let target = self.facing_target();
        let is_monster = self
            .world
            .entity_at(target)
            .map(|entity| entity.monster_kind().is_some())
            .unwrap_or(false);
        if is_monster {
            return self.fight_here(target, ui);
        }
        self.player.keep_fighting = false;
        ui.message("Nothing to fight here.");
        TurnState::Error
    }

    /// One combat round against the monster at `target`.
    ///
    /// The monster strikes first, then the player. Monster death is settled
    /// before player death, so a player who dies in the same round as the
    /// dragon still ends up dead.
    pub fn fight_here(&mut self, target: Position, ui: &mut dyn GameInterface) -> TurnState {
        let (name, kind, mut monster) = match self.world.entity_at(target) {
            Some(entity) => match (entity.monster_kind(), entity.combat()) {
                (Some(kind), Some(stats)) => (entity.name().to_string(), kind, *stats),
                _ => {
                    ui.message("Nothing to fight here.");
                    return TurnState::Error;
                }
            },
            None => {
                ui.message("Nothing to fight here.");
                return TurnState::Error;
            }
        };

        self.player.keep_moving = false;
        let bonus = self.player.armament_bonus();
        let mut report = Vec::new();

        let monster_attack = monster.attack(&mut self.dice);
        let player_defend = self.player.stats.defend(&mut self.dice) + bonus.defense_bonus();
        trace!("{} attacks {} against {}", name, monster_attack, player_defend);
        if monster_attack <= player_defend {
            report.push(format!("The {} misses you.", name));
        } else {
            report.push(format!("The {} hits you.", name));
            self.hurt_player(1);
            match kind {
                MonsterKind::Wizard => {
                    self.player.keep_fighting = false;
                    let start = self.world.start_position();
                    self.world.set_player_position(start);
                }
                MonsterKind::Dragon => self.hurt_player(1),
                _ => {}
            }
        }

        let player_attack = self.player.stats.attack(&mut self.dice) + bonus.offense_bonus();
        let monster_defend = monster.defend(&mut self.dice);
        trace!("Player attacks {} against {}", player_attack, monster_defend);
        if player_attack <= monster_defend {
            report.push(format!("You miss the {}.", name));
        } else {
            report.push(format!("You hit the {}.", name));
            monster.apply_health_delta(-1);
            self.statistics.damage_dealt += 1;
        }

        let mut next = if !monster.is_alive() {
            self.world.remove_entity(target);
            self.enter(target);
            self.statistics.monsters_killed += 1;
            self.player.keep_fighting = false;
            report.push(format!("You kill the {}.", name));
            if kind == MonsterKind::Dragon {
                report.push("You have won!".to_string());
                self.completion_state = GameCompletionState::Won;
                info!("The dragon is slain");
                TurnState::Dead
            } else {
                TurnState::Command
            }
        } else {
            if let Some(stats) = self.world.entity_at_mut(target).and_then(Entity::combat_mut) {
                *stats = monster;
            }
            if self.player.keep_fighting {
                TurnState::Fighting
            } else {
                TurnState::Command
            }
        };

        if !self.player.is_alive() {
            if kind == MonsterKind::Troll {
                report.push("YHBT. YHL. HAND!".to_string());
            } else {
                report.push("You are dead.".to_string());
            }
            self.player.keep_fighting = false;
            self.completion_state = GameCompletionState::Died;
            next = TurnState::Dead;
        }

        ui.message(&report.join(" "));
        next
    }

    /// Smashes the faced door at the cost of some health.
    pub fn batter(&mut self, ui: &mut dyn GameInterface) -> TurnState {
        let target = self.facing_target();
        if !self.world.entity_at(target).map(Entity::is_door).unwrap_or(false) {
            ui.message("Nothing to batter down here.");
            return TurnState::Error;
        }

        ui.message("You smash the door down.");
        self.world.remove_entity(target);
        self.hurt_player(config::HAZARD_DAMAGE);
        if !self.player.is_alive() {
            ui.message("You are dead.");
            self.completion_state = GameCompletionState::Died;
            return TurnState::Dead;
        }
        TurnState::Command
    }

    /// Opens the faced door. The key check happens before the prompt.
    pub fn open_door(&mut self, ui: &mut dyn GameInterface) -> TurnState {
        self.set_faced_door(true, ui)
    }

    pub fn close_door(&mut self, ui: &mut dyn GameInterface) -> TurnState {
        self.set_faced_door(false, ui)
    }

    fn set_faced_door(&mut self, open: bool, ui: &mut dyn GameInterface) -> TurnState {
        let target = self.facing_target();
        let door = match self.world.entity_at_mut(target) {
            Some(entity) if entity.is_door() => entity,
            _ => {
                ui.message(if open {
                    "Nothing to open here."
                } else {
                    "Nothing to close here."
                });
                return TurnState::Error;
            }
        };

        if door.door_is_open() == Some(open) {
            ui.message(if open {
                "The door is already open."
            } else {
                "The door is already closed."
            });
            return TurnState::Error;
        }

        door.set_door_open(open);
        TurnState::Command
    }

    /// Picks up whatever is in the player's own cell.
    pub fn take(&mut self, ui: &mut dyn GameInterface) -> TurnState {
        let here = self.player_position();
        if self.world.entity_at(here).is_some() {
            return self.take_here(here, ui);
        }
        ui.message("Nothing to take here.");
        TurnState::Error
    }

    /// Moves the entity at `target` into the pack and the player onto
    /// `target`. The entity stays put if it cannot be carried.
    pub fn take_here(&mut self, target: Position, ui: &mut dyn GameInterface) -> TurnState {
        let liftable = match self.world.entity_at(target) {
            Some(entity) => entity.is_liftable(),
            None => {
                ui.message("Nothing to take here.");
                return TurnState::Error;
            }
        };
        if !liftable {
            ui.message("You can't take that!");
            return TurnState::Error;
        }

        let Some(entity) = self.world.remove_entity(target) else {
            return TurnState::Error;
        };
        match self.player.carry(entity) {
            Ok(()) => {
                self.statistics.items_collected += 1;
                if target != self.player_position() {
                    self.enter(target);
                }
                TurnState::Command
            }
            Err(entity) => {
                self.world.insert_entity(target, entity);
                ui.message("You are carrying too much.");
                TurnState::Error
            }
        }
    }

    /// Puts an inventory slot's contents down in the player's cell.
    pub fn drop_item(&mut self, ui: &mut dyn GameInterface) -> CrawlResult<TurnState> {
        let here = self.player_position();
        if self.world.entity_at(here).is_some() {
            ui.message("You can't drop anything here.");
            return Ok(TurnState::Error);
        }

        ui.message("drop what?");
        if let Some(slot) = ui.read_digit(self)? {
            if let Some(entity) = self.player.drop_slot(slot) {
                debug!("Dropped {} at {:?}", entity.description(), here);
                self.world.insert_entity(here, entity);
            }
        }
        Ok(TurnState::Command)
    }

    /// Moves a carried armament (slots 3-6) into the hands.
    pub fn wield(&mut self, ui: &mut dyn GameInterface) -> CrawlResult<TurnState> {
        ui.message("wield what?");
        let slot = match ui.read_digit(self)? {
            Some(slot) if slot > config::WIELDED_SLOTS => slot,
            _ => return Ok(TurnState::Command),
        };
        let Some(entity) = self.player.drop_slot(slot) else {
            return Ok(TurnState::Command);
        };

        let wieldable = entity.armament().is_some();
        match self.player.wield(entity) {
            Ok(()) => Ok(TurnState::Command),
            Err(entity) => {
                ui.message(if wieldable {
                    "Your hands are full."
                } else {
                    "You can't wield that."
                });
                self.stow(entity);
                Ok(TurnState::Error)
            }
        }
    }

    /// Moves a wielded item (slots 1-2) back into the pack.
    pub fn unwield(&mut self, ui: &mut dyn GameInterface) -> CrawlResult<TurnState> {
        ui.message("unwield what?");
        let slot = match ui.read_digit(self)? {
            Some(slot) if (1..=config::WIELDED_SLOTS).contains(&slot) => slot,
            _ => return Ok(TurnState::Command),
        };
        let Some(entity) = self.player.drop_slot(slot) else {
            return Ok(TurnState::Command);
        };

        match self.player.carry(entity) {
            Ok(()) => Ok(TurnState::Command),
            Err(entity) => {
                ui.message("You are carrying too much.");
                if let Err(entity) = self.player.wield(entity) {
                    self.stow(entity);
                }
                Ok(TurnState::Error)
            }
        }
    }

    /// Returns an entity to the pack, or to the floor when there is no room.
    fn stow(&mut self, entity: Entity) {
        if let Err(entity) = self.player.carry(entity) {
            warn!("No room to return {} to the pack", entity.description());
            let here = self.player_position();
            if self.world.entity_at(here).is_none() {
                self.world.insert_entity(here, entity);
            }
        }
    }

    /// Drinks the first carried potion.
    ///
    /// The potion applies a health delta of `ceiling - 2 * health`, leaving
    /// the player at `ceiling - health`.
    pub fn quaff(&mut self, ui: &mut dyn GameInterface) -> TurnState {
        if self.player.take_potion().is_none() {
            ui.message("You don't have any potions.");
            return TurnState::Error;
        }
        let health = self.player.health();
        self.player
            .stats
            .apply_health_delta(config::POTION_CEILING - 2 * health);
        debug!("Quaffed a potion: health {} -> {}", health, self.player.health());
        TurnState::Command
    }

    pub fn quit(&mut self, ui: &mut dyn GameInterface) -> CrawlResult<TurnState> {
        ui.message("Are you sure you want to quit? (y/n)");
        if ui.read_confirmation(self)? {
            self.completion_state = GameCompletionState::Quit;
            Ok(TurnState::Quit)
        } else {
            Ok(TurnState::Command)
        }
    }

    fn dead(&mut self, ui: &mut dyn GameInterface) -> CrawlResult<TurnState> {
        ui.message("--press space to continue--");
        ui.wait_for_continue(self)?;
        Ok(TurnState::Quit)
    }
}
