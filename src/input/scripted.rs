//! # Scripted Interface
//!
//! A headless [`GameInterface`] that answers every read from a fixed script
//! and records what the game said. Used by tests and by anything that wants
//! to drive a game without a terminal.

use crate::game::GameState;
use crate::input::{Command, DirectionInput, GameInterface};
use crate::{CrawlError, CrawlResult};
use std::collections::VecDeque;

/// One scripted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedInput {
    Command(Command),
    Direction(DirectionInput),
    Digit(Option<usize>),
    Confirm(bool),
    Continue,
}

/// Plays back queued inputs and keeps a transcript.
///
/// Reading past the end of the script, or reading a different kind of input
/// than the next one queued, is an error.
///
/// # Examples
///
/// ```
/// use mazecrawl::{Command, GameInterface, ScriptedInput, ScriptedInterface};
///
/// let mut ui = ScriptedInterface::new([ScriptedInput::Command(Command::Quaff)]);
/// ui.message("hello");
/// assert_eq!(ui.last_message(), Some("hello"));
/// assert_eq!(ui.remaining(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedInterface {
    script: VecDeque<ScriptedInput>,
    /// Every message shown, oldest first
    pub messages: Vec<String>,
    /// Number of alerts raised
    pub alerts: usize,
    /// Number of redraw requests
    pub redraws: usize,
}

impl ScriptedInterface {
    pub fn new<I>(script: I) -> Self
    where
        I: IntoIterator<Item = ScriptedInput>,
    {
        Self {
            script: script.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Appends more input to the end of the script.
    pub fn push(&mut self, input: ScriptedInput) {
        self.script.push_back(input);
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    pub fn last_message(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }

    /// Whether any message so far contains `text`.
    pub fn said(&self, text: &str) -> bool {
        self.messages.iter().any(|message| message.contains(text))
    }

    fn next(&mut self, wanted: &str) -> CrawlResult<ScriptedInput> {
        self.script.pop_front().ok_or_else(|| {
            CrawlError::InvalidState(format!("Script ran out while waiting for {}", wanted))
        })
    }

    fn mismatch(wanted: &str, got: ScriptedInput) -> CrawlError {
        CrawlError::InvalidState(format!("Expected {} in script, found {:?}", wanted, got))
    }
}

impl GameInterface for ScriptedInterface {
    fn read_command(&mut self, _state: &GameState) -> CrawlResult<Command> {
        match self.next("a command")? {
            ScriptedInput::Command(command) => Ok(command),
            other => Err(Self::mismatch("a command", other)),
        }
    }

    fn read_direction(&mut self, _state: &GameState) -> CrawlResult<DirectionInput> {
        match self.next("a direction")? {
            ScriptedInput::Direction(direction) => Ok(direction),
            other => Err(Self::mismatch("a direction", other)),
        }
    }

    fn read_digit(&mut self, _state: &GameState) -> CrawlResult<Option<usize>> {
        match self.next("a digit")? {
            ScriptedInput::Digit(digit) => Ok(digit),
            other => Err(Self::mismatch("a digit", other)),
        }
    }

    fn read_confirmation(&mut self, _state: &GameState) -> CrawlResult<bool> {
        match self.next("a confirmation")? {
            ScriptedInput::Confirm(answer) => Ok(answer),
            other => Err(Self::mismatch("a confirmation", other)),
        }
    }

    fn wait_for_continue(&mut self, _state: &GameState) -> CrawlResult<()> {
        match self.next("the continue key")? {
            ScriptedInput::Continue => Ok(()),
            other => Err(Self::mismatch("the continue key", other)),
        }
    }

    fn message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }

    fn alert(&mut self) {
        self.alerts += 1;
    }

    fn redraw(&mut self, _state: &GameState) -> CrawlResult<()> {
        self.redraws += 1;
        Ok(())
    }
}
