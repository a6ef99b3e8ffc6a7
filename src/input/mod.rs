//! # Input Module
//!
//! The presentation contract the state machine talks to, and the key
//! bindings that turn terminal key events into command tokens.
//!
//! The state machine never touches the terminal. It asks a [`GameInterface`]
//! for the kind of input it needs next (a command, a direction, a digit or a
//! yes/no answer), hands it status messages, and requests redraws. The
//! terminal implementation lives in `rendering`; [`ScriptedInterface`] plays
//! a fixed script for tests and headless runs.

pub mod commands;
pub mod scripted;

pub use commands::*;
pub use scripted::*;

use crate::game::{Direction, GameState};
use crate::CrawlResult;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Everything the game needs from its presentation layer.
///
/// Every read blocks until the player answers. Implementations are free to
/// redraw from `state` while they wait.
pub trait GameInterface {
    /// Waits for a top-level command.
    fn read_command(&mut self, state: &GameState) -> CrawlResult<Command>;

    /// Waits for the answer to a direction prompt.
    fn read_direction(&mut self, state: &GameState) -> CrawlResult<DirectionInput>;

    /// Waits for a key and returns it as a digit, `None` if it was not one.
    fn read_digit(&mut self, state: &GameState) -> CrawlResult<Option<usize>>;

    /// Waits for a yes/no answer. Anything but `y` is no.
    fn read_confirmation(&mut self, state: &GameState) -> CrawlResult<bool>;

    /// Waits for the continue key after the game has ended.
    fn wait_for_continue(&mut self, state: &GameState) -> CrawlResult<()>;

    /// Shows a status message.
    fn message(&mut self, text: &str);

    /// Signals a failed action.
    fn alert(&mut self);

    /// Redraws everything from the current state.
    fn redraw(&mut self, state: &GameState) -> CrawlResult<()>;

    /// Repaints the screen as it is, after it got garbled.
    fn refresh(&mut self, state: &GameState) -> CrawlResult<()> {
        self.redraw(state)
    }

    /// Re-lays out the panes for a new terminal size.
    fn resize(&mut self, state: &GameState) -> CrawlResult<()> {
        self.redraw(state)
    }
}

/// Maps terminal key events to command tokens.
///
/// Vi keys step (lowercase) or run (uppercase). Arrows and the
/// Home/PgUp/End/PgDn cluster step like a numeric keypad.
#[derive(Debug, Clone, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    /// use mazecrawl::{Command, Direction, InputHandler};
    ///
    /// let handler = InputHandler::new();
    /// let key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
    /// assert_eq!(handler.command_for(key), Command::Move(Direction::South));
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Command bound to a key at the top level.
    pub fn command_for(&self, key: KeyEvent) -> Command {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('r') | KeyCode::Char('R') => Command::Refresh,
                _ => Command::Unrecognized,
            };
        }

        if let Some(direction) = Self::step_direction(key.code) {
            return Command::Move(direction);
        }

        match key.code {
            KeyCode::Char('H') => Command::Run(Direction::West),
            KeyCode::Char('J') => Command::Run(Direction::South),
            KeyCode::Char('K') => Command::Run(Direction::North),
            KeyCode::Char('L') => Command::Run(Direction::East),
            KeyCode::Char('Y') => Command::Run(Direction::Northwest),
            KeyCode::Char('U') => Command::Run(Direction::Northeast),
            KeyCode::Char('B') => Command::Run(Direction::Southwest),
            KeyCode::Char('N') => Command::Run(Direction::Southeast),

            KeyCode::Char('m') => Command::MoveOver,
            KeyCode::Char('M') => Command::RunOver,
            KeyCode::Char('f') => Command::Fight,
            KeyCode::Char('F') => Command::FightToDeath,
            KeyCode::Char('o') => Command::Open,
            KeyCode::Char('O') => Command::Batter,
            KeyCode::Char('c') => Command::Close,
            KeyCode::Char(',') => Command::Take,
            KeyCode::Char('d') => Command::Drop,
            KeyCode::Char('w') => Command::Wield,
            KeyCode::Char('T') => Command::Unwield,
            KeyCode::Char('q') => Command::Quaff,
            KeyCode::Char('Q') => Command::Quit,
            KeyCode::Char('v') => Command::Version,

            _ => Command::Unrecognized,
        }
    }

    /// Answer to a direction prompt. Esc cancels.
    pub fn direction_for(&self, key: KeyEvent) -> DirectionInput {
        if key.code == KeyCode::Esc {
            return DirectionInput::Cancelled;
        }
        match Self::step_direction(key.code) {
            Some(direction) => DirectionInput::Direction(direction),
            None => DirectionInput::None,
        }
    }

    /// Digit value of a key, if it is one.
    pub fn digit_for(&self, key: KeyEvent) -> Option<usize> {
        match key.code {
            KeyCode::Char(c) => c.to_digit(10).map(|digit| digit as usize),
            _ => None,
        }
    }

    /// Whether a key answers yes.
    pub fn confirmation_for(&self, key: KeyEvent) -> bool {
        matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'))
    }

    /// Whether a key continues past the end-of-game prompt.
    pub fn is_continue(&self, key: KeyEvent) -> bool {
        key.code == KeyCode::Char(' ')
    }

    fn step_direction(code: KeyCode) -> Option<Direction> {
        match code {
            KeyCode::Char('h') | KeyCode::Left => Some(Direction::West),
            KeyCode::Char('j') | KeyCode::Down => Some(Direction::South),
            KeyCode::Char('k') | KeyCode::Up => Some(Direction::North),
            KeyCode::Char('l') | KeyCode::Right => Some(Direction::East),
            KeyCode::Char('y') | KeyCode::Home => Some(Direction::Northwest),
            KeyCode::Char('u') | KeyCode::PageUp => Some(Direction::Northeast),
            KeyCode::Char('b') | KeyCode::End => Some(Direction::Southwest),
            KeyCode::Char('n') | KeyCode::PageDown => Some(Direction::Southeast),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_vi_keys_step_and_run() {
        let handler = InputHandler::new();
        assert_eq!(handler.command_for(key(KeyCode::Char('y'))), Command::Move(Direction::Northwest));
        assert_eq!(handler.command_for(key(KeyCode::Char('N'))), Command::Run(Direction::Southeast));
        assert_eq!(handler.command_for(key(KeyCode::PageDown)), Command::Move(Direction::Southeast));
        assert_eq!(handler.command_for(key(KeyCode::Up)), Command::Move(Direction::North));
    }

    #[test]
    fn test_action_keys() {
        let handler = InputHandler::new();
        assert_eq!(handler.command_for(key(KeyCode::Char('O'))), Command::Batter);
        assert_eq!(handler.command_for(key(KeyCode::Char('T'))), Command::Unwield);
        assert_eq!(handler.command_for(key(KeyCode::Char(','))), Command::Take);
        assert_eq!(handler.command_for(key(KeyCode::Char('Q'))), Command::Quit);
        assert_eq!(handler.command_for(key(KeyCode::Char('z'))), Command::Unrecognized);
        assert_eq!(
            handler.command_for(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            Command::Refresh
        );
    }

    #[test]
    fn test_direction_prompt_keys() {
        let handler = InputHandler::new();
        assert_eq!(handler.direction_for(key(KeyCode::Esc)), DirectionInput::Cancelled);
        assert_eq!(
            handler.direction_for(key(KeyCode::Char('l'))),
            DirectionInput::Direction(Direction::East)
        );
        // Running keys do not answer a direction prompt
        assert_eq!(handler.direction_for(key(KeyCode::Char('L'))), DirectionInput::None);
    }

    #[test]
    fn test_digits_and_confirmation() {
        let handler = InputHandler::new();
        assert_eq!(handler.digit_for(key(KeyCode::Char('4'))), Some(4));
        assert_eq!(handler.digit_for(key(KeyCode::Char('x'))), None);
        assert!(handler.confirmation_for(key(KeyCode::Char('Y'))));
        assert!(!handler.confirmation_for(key(KeyCode::Char('n'))));
        assert!(handler.is_continue(key(KeyCode::Char(' '))));
    }
}
