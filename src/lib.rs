//! A tiny terminal game console: a launcher for `game_*` executables and
//! two games to go with it, snake and a lane-dodging racer.

pub mod body;
pub mod config;
pub mod direction;
pub mod game;
pub mod grid;
pub mod input;
pub mod launcher;
pub mod lifecycle;
pub mod logging;
pub mod racing;
pub mod scheduler;
pub mod snake;
pub mod term;

#[cfg(test)]
mod testutil;

pub type TermInt = u16;
pub type Coords = (u16, u16);
