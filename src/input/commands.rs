//! # Command Definitions
//!
//! Tokens exchanged between the state machine and whatever reads the keys.

use crate::game::Direction;
use serde::{Deserialize, Serialize};

/// A top-level command read while the game is waiting for input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Step once, picking up whatever is there
    Move(Direction),
    /// Step repeatedly until something interrupts
    Run(Direction),
    /// Step once without picking anything up (asks for a direction)
    MoveOver,
    /// Run without picking anything up (asks for a direction)
    RunOver,
    /// One round of combat (asks for a direction)
    Fight,
    /// Combat until someone dies (asks for a direction)
    FightToDeath,
    Open,
    Close,
    /// Smash a door at the cost of some health
    Batter,
    Take,
    Drop,
    Wield,
    Unwield,
    Quaff,
    Quit,
    Version,
    Refresh,
    Resize,
    /// A key with no binding
    Unrecognized,
}

impl Command {
    /// Verb used in the "in which direction?" prompt, for directed commands.
    pub fn direction_prompt(self) -> Option<&'static str> {
        match self {
            Command::MoveOver => Some("move over"),
            Command::RunOver => Some("run over"),
            Command::Fight => Some("fight"),
            Command::FightToDeath => Some("fight to the death"),
            Command::Open => Some("open door"),
            Command::Close => Some("close door"),
            Command::Batter => Some("batter down door"),
            _ => None,
        }
    }
}

/// Answer to a direction prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectionInput {
    Direction(Direction),
    /// The prompt was dismissed
    Cancelled,
    /// A key that names no direction
    None,
}
