//! # Rendering Module
//!
//! Terminal rendering with crossterm.
//!
//! [`ui`] turns game state into lines of text; [`display`] owns the terminal
//! session and implements the game's presentation contract on top of it.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;
