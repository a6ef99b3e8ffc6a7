//! # Mazecrawl
//!
//! A single-player dungeon crawl through a procedurally generated maze,
//! rendered in the terminal.
//!
//! ## Architecture Overview
//!
//! The crate is split along the same seams the game itself has:
//!
//! - **Generation**: grows the maze, populates it with monsters, items and
//!   traps, carves the entry and exit, then raises and classifies walls
//! - **Game**: the world grid, entities, the player and the turn-based state
//!   machine that resolves movement, combat and item handling
//! - **Input**: the presentation contract the state machine talks to, plus
//!   key mapping and a scripted implementation for headless play
//! - **Rendering**: the crossterm terminal implementation of that contract
//!
//! Everything runs on one thread. A `GameState` owns the world and the
//! player outright; there is no global state.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the Mazecrawl engine.
///
/// Player-facing failures (walking into a wall, a full pack) are not errors
/// in this sense; they are reported as messages and drive the state machine
/// into [`TurnState::Error`].
#[derive(thiserror::Error, Debug)]
pub enum CrawlError {
    /// Terminal I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot serialization failed
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Generation parameters cannot produce a maze
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Mazecrawl codebase.
pub type CrawlResult<T> = Result<T, CrawlError>;

/// Name shown in the title bar and version banner.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default maze height in tiles
    pub const MAP_HEIGHT: usize = 15;

    /// Default maze width in tiles
    pub const MAP_WIDTH: usize = 15;

    /// Player starting health
    pub const PLAYER_START_HEALTH: i32 = 10;

    /// Health a potion tops the player up against
    pub const POTION_CEILING: i32 = 10;

    /// Number of wielded slots (inventory keys 1-2)
    pub const WIELDED_SLOTS: usize = 2;

    /// Number of carried slots (inventory keys 3-6)
    pub const CARRIED_SLOTS: usize = 4;

    /// Health lost when stepping in a trap or battering a door
    pub const HAZARD_DAMAGE: i32 = 2;

    /// Redraw beats per second while waiting for input
    pub const BEATS_PER_SECOND: u64 = 50;

    /// Lines of message history kept for the message pane
    pub const MESSAGE_HISTORY: usize = 15;

    /// Percent chance that an eligible floor cell becomes a door
    pub const DOOR_CHANCE: u32 = 30;

    /// One in this many growth steps reshuffles the carving directions
    pub const RESHUFFLE_ODDS: u32 = 5;
}
