//! # Display Management
//!
//! The crossterm terminal implementation of [`GameInterface`].
//!
//! The screen is split into a title bar, the map viewport, the inventory
//! pane and the message pane. While waiting for a key the display polls at
//! the redraw tick and repaints whenever something changed since the last
//! frame.

use crate::config;
use crate::game::GameState;
use crate::input::{Command, DirectionInput, GameInterface, InputHandler};
use crate::rendering::{inventory_lines, render_map_lines, title_line, MessageLog};
use crate::CrawlResult;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use log::{debug, warn};
use std::io::{self, Stdout, Write};
use std::time::Duration;

/// Map viewport size in cells.
const VIEWPORT_ROWS: usize = 15;
const VIEWPORT_COLS: usize = 15;
/// Width reserved for the inventory pane.
const INVENTORY_COLS: usize = 24;
/// Narrowest message pane worth drawing beside the map.
const MIN_MESSAGE_COLS: usize = 20;

/// What a wait on the terminal produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalEvent {
    Key(KeyEvent),
    Resize,
}

/// Pane origins for the current terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub columns: u16,
    pub rows: u16,
    pub map: (u16, u16),
    pub inventory: (u16, u16),
    pub messages: (u16, u16),
    pub message_width: usize,
}

impl Layout {
    /// Places the panes for a `columns` x `rows` terminal.
    ///
    /// The message pane sits right of the inventory when there is room and
    /// under the map otherwise.
    pub fn for_size(columns: u16, rows: u16) -> Self {
        let map = (1, 2);
        let inventory_x = map.0 + VIEWPORT_COLS as u16 + 2;
        let inventory = (inventory_x, 2);
        let beside_x = inventory_x as usize + INVENTORY_COLS;
        let room_beside = (columns as usize).saturating_sub(beside_x + 1);

        let (messages, message_width) = if room_beside >= MIN_MESSAGE_COLS {
            ((beside_x as u16, 2), room_beside)
        } else {
            let below_y = map.1 + VIEWPORT_ROWS as u16 + 1;
            ((1, below_y), (columns as usize).saturating_sub(2).max(1))
        };

        Self {
            columns,
            rows,
            map,
            inventory,
            messages,
            message_width,
        }
    }
}

/// Full-screen terminal session.
///
/// Creating one switches the terminal to raw mode on the alternate screen;
/// dropping it restores the terminal.
pub struct TerminalDisplay {
    stdout: Stdout,
    input: InputHandler,
    log: MessageLog,
    layout: Layout,
    tick: Duration,
    dirty: bool,
}

impl TerminalDisplay {
    pub fn new() -> CrawlResult<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(Hide)?;

        let (columns, rows) = terminal::size()?;
        let layout = Layout::for_size(columns, rows);
        debug!("Terminal session started at {}x{}", columns, rows);

        Ok(Self {
            stdout,
            input: InputHandler::new(),
            log: MessageLog::new(layout.message_width),
            layout,
            tick: Duration::from_millis(1000 / config::BEATS_PER_SECOND),
            dirty: true,
        })
    }

    /// Blocks until a key press or a resize, repainting on the tick while
    /// there is something new to show.
    fn next_event(&mut self, state: &GameState) -> CrawlResult<TerminalEvent> {
        loop {
            if self.dirty {
                self.draw(state)?;
            }
            if !event::poll(self.tick)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(TerminalEvent::Key(key));
                }
                Event::Resize(columns, rows) => {
                    self.relayout(columns, rows);
                    return Ok(TerminalEvent::Resize);
                }
                _ => {}
            }
        }
    }

    /// Waits for a key, handling resizes in place.
    fn next_key(&mut self, state: &GameState) -> CrawlResult<KeyEvent> {
        loop {
            match self.next_event(state)? {
                TerminalEvent::Key(key) => return Ok(key),
                TerminalEvent::Resize => self.dirty = true,
            }
        }
    }

    fn relayout(&mut self, columns: u16, rows: u16) {
        self.layout = Layout::for_size(columns, rows);
        self.log.set_width(self.layout.message_width);
        self.dirty = true;
    }

    fn draw(&mut self, state: &GameState) -> CrawlResult<()> {
        let layout = self.layout;
        let out = &mut self.stdout;
        out.queue(Clear(ClearType::All))?;

        out.queue(MoveTo(0, 0))?;
        out.queue(Print(title_line(layout.columns as usize)))?;

        let (map_x, map_y) = layout.map;
        for (index, line) in render_map_lines(&state.world, VIEWPORT_ROWS, VIEWPORT_COLS)
            .iter()
            .enumerate()
        {
            out.queue(MoveTo(map_x, map_y + index as u16))?;
            out.queue(Print(line))?;
        }

        let (inventory_x, inventory_y) = layout.inventory;
        for (index, line) in inventory_lines(&state.player).iter().enumerate() {
            out.queue(MoveTo(inventory_x, inventory_y + index as u16))?;
            out.queue(Print(line))?;
        }

        let (message_x, message_y) = layout.messages;
        for (index, line) in self.log.lines().enumerate() {
            let y = message_y + index as u16;
            if y >= layout.rows {
                break;
            }
            out.queue(MoveTo(message_x, y))?;
            out.queue(Print(line))?;
        }

        out.flush()?;
        self.dirty = false;
        Ok(())
    }
}

impl GameInterface for TerminalDisplay {
    fn read_command(&mut self, state: &GameState) -> CrawlResult<Command> {
        match self.next_event(state)? {
            TerminalEvent::Key(key) => Ok(self.input.command_for(key)),
            TerminalEvent::Resize => Ok(Command::Resize),
        }
    }

    fn read_direction(&mut self, state: &GameState) -> CrawlResult<DirectionInput> {
        let key = self.next_key(state)?;
        Ok(self.input.direction_for(key))
    }

    fn read_digit(&mut self, state: &GameState) -> CrawlResult<Option<usize>> {
        let key = self.next_key(state)?;
        Ok(self.input.digit_for(key))
    }

    fn read_confirmation(&mut self, state: &GameState) -> CrawlResult<bool> {
        let key = self.next_key(state)?;
        Ok(self.input.confirmation_for(key))
    }

    fn wait_for_continue(&mut self, state: &GameState) -> CrawlResult<()> {
        loop {
            let key = self.next_key(state)?;
            if self.input.is_continue(key) {
                return Ok(());
            }
        }
    }

    fn message(&mut self, text: &str) {
        self.log.push(text);
        self.dirty = true;
    }

    fn alert(&mut self) {
        if let Err(err) = self.stdout.execute(Print('\x07')) {
            warn!("Could not ring the terminal bell: {}", err);
        }
    }

    fn redraw(&mut self, state: &GameState) -> CrawlResult<()> {
        self.draw(state)
    }

    fn resize(&mut self, state: &GameState) -> CrawlResult<()> {
        let (columns, rows) = terminal::size()?;
        self.relayout(columns, rows);
        self.draw(state)
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let restored = self
            .stdout
            .execute(Show)
            .and_then(|out| out.execute(LeaveAlternateScreen))
            .map(|_| ())
            .and_then(|_| terminal::disable_raw_mode());
        if let Err(err) = restored {
            warn!("Failed to restore the terminal: {}", err);
        }
    }
}
