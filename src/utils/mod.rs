//! # Utilities Module
//!
//! Dice and reachability helpers shared by generation and play.

pub mod math;
pub mod pathfinding;

pub use math::*;
pub use pathfinding::*;
