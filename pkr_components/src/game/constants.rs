//! Sizing constants shared by the table building blocks.

/// Smallest table capacity a `Table` accepts.
pub const MIN_PLAYERS: usize = 4;

/// Largest table capacity a `Table` accepts.
pub const MAX_PLAYERS: usize = 10;

/// Capacity used when nothing else is configured.
pub const DEFAULT_MAX_PLAYERS: usize = 9;

/// Number of players needed before blinds can be posted.
pub const MIN_PLAYERS_TO_DEAL: usize = 2;

/// Community card slots: three flop cards, the turn and the river.
pub const BOARD_SIZE: usize = 5;

/// Cards on the flop.
pub const FLOP_SIZE: usize = 3;

pub const DECK_SIZE: usize = 52;
