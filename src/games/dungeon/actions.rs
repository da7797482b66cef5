//! Semantic action IDs for dungeon click targets.

pub const MOVE_UP: u16 = 1;
pub const MOVE_DOWN: u16 = 2;
pub const MOVE_LEFT: u16 = 3;
pub const MOVE_RIGHT: u16 = 4;
pub const RESTART: u16 = 5;
