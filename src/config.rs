//! Fixed game constants. Board sizes are compile-time only.

use crate::snake::CollisionPolicy;

pub const INPUT_POLL_MS: u64 = 20;

pub const SNAKE_WIDTH: usize = 20;
pub const SNAKE_HEIGHT: usize = 25;
pub const SNAKE_INITIAL_LENGTH: usize = 2;
pub const SNAKE_FPS: u32 = 5;
pub const SNAKE_COLLISION_POLICY: CollisionPolicy = CollisionPolicy::Hold;

// Each snake cell is drawn as the glyph followed by two spaces
pub const SNAKE_CELL_WIDTH: u16 = 3;

pub const SNAKE_HEAD_CHAR: char = 'O';
pub const SNAKE_BODY_CHAR: char = '#';
pub const FOOD_CHAR: char = 'X';
pub const SNAKE_EMPTY_CHAR: char = '.';

pub const ROAD_WIDTH: usize = 7;
pub const ROAD_HEIGHT: usize = 25;
pub const RACING_FPS: u32 = 5;

pub const CAR_CHAR: char = 'O';
pub const OBSTACLE_CHAR: char = '#';
pub const CRASH_CHAR: char = 'X';
pub const ROAD_EMPTY_CHAR: char = ' ';
pub const ROAD_BORDER_CHAR: char = '|';

/// Executables in the working directory with this prefix show up in the launcher.
pub const GAME_PREFIX: &str = "game_";

/// Names the log file. Logging stays off when unset.
pub const LOG_ENV: &str = "GAME_CONSOLE_LOG";
